//! Annotation dictionaries
//!
//! Reads a page's `/Annots` into [`RawAnnotation`] records. Colors are
//! normalized to RGB here so the classifier only ever sees three components.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::document::{AnnotationCode, DocumentError, RawAnnotation};

/// Follow a reference to the object it points at
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

pub(crate) fn number_array(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<Vec<f64>> {
    let obj = resolve(doc, dict.get(key).ok()?)?;
    let Object::Array(values) = obj else {
        return None;
    };
    Some(
        values
            .iter()
            .filter_map(|v| resolve(doc, v).and_then(number))
            .collect(),
    )
}

/// Decode a PDF text string: UTF-16BE or UTF-8 with a byte order mark,
/// PDFDocEncoding (read as Latin-1) otherwise
pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Annotation color as RGB in 0-1
///
/// `/C` holds 0 (transparent), 1 (gray), 3 (RGB) or 4 (CMYK) components.
pub fn to_rgb(components: &[f64]) -> Option<Vec<f64>> {
    match *components {
        [gray] => Some(vec![gray, gray, gray]),
        [r, g, b] => Some(vec![r, g, b]),
        [c, m, y, k] => Some(vec![
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        ]),
        _ => None,
    }
}

/// One annotation dictionary as a raw record
pub fn read_annotation(doc: &Document, dict: &Dictionary) -> RawAnnotation {
    let subtype = match dict.get(b"Subtype").ok().and_then(|o| resolve(doc, o)) {
        Some(Object::Name(name)) => Some(AnnotationCode::Name(
            String::from_utf8_lossy(name).into_owned(),
        )),
        _ => None,
    };

    let color = number_array(doc, dict, b"C").and_then(|c| to_rgb(&c));

    let contents = match dict.get(b"Contents").ok().and_then(|o| resolve(doc, o)) {
        Some(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
        _ => None,
    };

    RawAnnotation {
        subtype,
        annotation_type: None,
        color,
        quad_points: number_array(doc, dict, b"QuadPoints"),
        quadrilaterals: None,
        contents,
    }
}

/// All annotations of a page, in `/Annots` order
///
/// A page without `/Annots` has no annotations. A `/Annots` entry that is not
/// an array, or that references a missing object, makes the page unreadable.
pub fn page_annotations(
    doc: &Document,
    page_id: ObjectId,
    page: u32,
) -> Result<Vec<RawAnnotation>, DocumentError> {
    let unreadable = |message: String| DocumentError::ExtractionError { page, message };

    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| unreadable(e.to_string()))?;

    let Ok(annots) = page_dict.get(b"Annots") else {
        return Ok(Vec::new());
    };

    let Some(Object::Array(entries)) = resolve(doc, annots) else {
        return Err(unreadable("/Annots is not an array".to_string()));
    };

    let mut annotations = Vec::with_capacity(entries.len());
    for entry in entries {
        match resolve(doc, entry) {
            Some(Object::Dictionary(dict)) => annotations.push(read_annotation(doc, dict)),
            Some(_) => {
                tracing::debug!("Page {}: skipping non-dictionary annotation entry", page);
            }
            None => return Err(unreadable("dangling annotation reference".to_string())),
        }
    }

    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, StringFormat};

    use super::*;

    #[test]
    fn test_to_rgb() {
        assert_eq!(to_rgb(&[0.5]), Some(vec![0.5, 0.5, 0.5]));
        assert_eq!(to_rgb(&[1.0, 1.0, 0.0]), Some(vec![1.0, 1.0, 0.0]));
        // Pure yellow in CMYK
        assert_eq!(to_rgb(&[0.0, 0.0, 1.0, 0.0]), Some(vec![1.0, 1.0, 0.0]));
        assert_eq!(to_rgb(&[]), None);
        assert_eq!(to_rgb(&[0.1, 0.2]), None);
    }

    #[test]
    fn test_decode_text_string() {
        assert_eq!(decode_text_string(b"nota"), "nota");
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x61, 0x00, 0xE7]), "aç");
        assert_eq!(decode_text_string(&[0xEF, 0xBB, 0xBF, 0x61, 0xC3, 0xA7]), "aç");
        assert_eq!(decode_text_string(&[0x61, 0xE7, 0x61, 0x6F]), "açao");
    }

    #[test]
    fn test_read_highlight_dictionary() {
        let doc = Document::with_version("1.7");
        let dict = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Highlight",
            "C" => vec![Object::Real(0.0), Object::Real(0.0), 1.into(), 0.into()],
            "QuadPoints" => vec![
                72.into(), 712.into(), 272.into(), 712.into(),
                72.into(), 700.into(), 272.into(), 700.into(),
            ],
            "Contents" => Object::String(b"nota".to_vec(), StringFormat::Literal),
        };

        let raw = read_annotation(&doc, &dict);
        assert_eq!(raw.code(), Some(&AnnotationCode::Name("Highlight".to_string())));
        assert_eq!(raw.color, Some(vec![1.0, 1.0, 0.0]));
        assert_eq!(raw.quads().map(|q| q.len()), Some(8));
        assert_eq!(raw.contents.as_deref(), Some("nota"));
    }

    #[test]
    fn test_page_without_annots() {
        let mut doc = Document::with_version("1.7");
        let page_id = doc.add_object(dictionary! { "Type" => "Page" });
        assert!(page_annotations(&doc, page_id, 1).unwrap().is_empty());
    }

    #[test]
    fn test_referenced_annotations_and_bad_annots() {
        let mut doc = Document::with_version("1.7");
        let annot_id = doc.add_object(dictionary! {
            "Subtype" => "Underline",
            "QuadPoints" => vec![0.into(), 1.into(), 1.into(), 1.into(), 0.into(), 0.into(), 1.into(), 0.into()],
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Annots" => vec![Object::Reference(annot_id)],
        });

        let annotations = page_annotations(&doc, page_id, 1).unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(
            annotations[0].code(),
            Some(&AnnotationCode::Name("Underline".to_string()))
        );
        assert!(annotations[0].color.is_none());

        let bad_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Annots" => 5,
        });
        assert!(matches!(
            page_annotations(&doc, bad_page, 2),
            Err(DocumentError::ExtractionError { page: 2, .. })
        ));
    }
}
