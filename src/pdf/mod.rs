//! Native PDF reading
//!
//! [`PdfDocument`] implements [`crate::document::DocumentSource`] over raw PDF
//! bytes: text lines from MuPDF structured text, highlight annotations from
//! `/Annots` via lopdf, page images from MuPDF.

mod annotations;
mod document;
mod stext;

pub use annotations::{decode_text_string, page_annotations, read_annotation, to_rgb};
pub use document::PdfDocument;
pub use stext::{page_text_items, PageFrame};

#[cfg(test)]
pub(crate) use document::tests::build_pdf;
