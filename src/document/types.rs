//! Raw document-layer records
//!
//! These mirror what PDF.js hands a browser (`getTextContent()` items and
//! `getAnnotations()` records), so a front end can post its extraction
//! verbatim. Native backends produce the same shapes.

use serde::{Deserialize, Serialize};

/// Identity text transform `[a, b, c, d, e, f]`
pub const IDENTITY_TRANSFORM: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// One text run as reported by the text layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextItem {
    /// The run's text
    #[serde(rename = "str", default)]
    pub text: String,
    /// Text rendering matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Vec<f64>>,
    /// Older PDF.js builds report the matrix under this name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_matrix: Option<Vec<f64>>,
    /// Advance width in page units, when the backend knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl RawTextItem {
    pub fn new(text: impl Into<String>, transform: [f64; 6], width: Option<f64>) -> Self {
        Self {
            text: text.into(),
            transform: Some(transform.to_vec()),
            text_matrix: None,
            width,
        }
    }

    /// The effective transform, falling back to identity when absent or short
    pub fn effective_transform(&self) -> [f64; 6] {
        let source = self
            .transform
            .as_deref()
            .filter(|t| t.len() >= 6)
            .or_else(|| self.text_matrix.as_deref().filter(|t| t.len() >= 6));

        match source {
            Some(t) => {
                let mut out = IDENTITY_TRANSFORM;
                for (slot, value) in out.iter_mut().zip(t.iter()) {
                    if value.is_finite() {
                        *slot = *value;
                    }
                }
                out
            }
            None => IDENTITY_TRANSFORM,
        }
    }
}

/// Annotation subtype as either a PDF name or a PDF.js numeric code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationCode {
    Code(i64),
    Name(String),
}

/// One annotation record as reported by the document layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<AnnotationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<AnnotationCode>,
    /// RGB components, either 0-1 or 0-255
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    /// Flat quad point list, 8 numbers per quad
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quad_points: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrilaterals: Option<Vec<f64>>,
    /// Popup/comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

impl RawAnnotation {
    /// Subtype from whichever field the backend filled in
    pub fn code(&self) -> Option<&AnnotationCode> {
        self.subtype.as_ref().or(self.annotation_type.as_ref())
    }

    /// Quad points from whichever field the backend filled in
    pub fn quads(&self) -> Option<&[f64]> {
        self.quad_points
            .as_deref()
            .filter(|q| !q.is_empty())
            .or_else(|| self.quadrilaterals.as_deref())
    }
}

/// A rasterised page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// PNG-encoded image
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
