//! Highlight annotation types
//!
//! Raw annotation records are decoded once, here, into [`HighlightRegion`].
//! Records that are not text-markup annotations are dropped at this boundary.

use serde::{Deserialize, Serialize};

use crate::document::{AnnotationCode, RawAnnotation};
use crate::geometry::Rect;

use super::quads::quad_boxes;

/// Text-markup annotation kinds we cite from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
}

impl AnnotationKind {
    /// Decode a PDF subtype name or PDF.js annotation type code
    pub fn from_code(code: &AnnotationCode) -> Option<Self> {
        match code {
            AnnotationCode::Code(9) => Some(Self::Highlight),
            AnnotationCode::Code(10) => Some(Self::Underline),
            AnnotationCode::Code(11) => Some(Self::Squiggly),
            AnnotationCode::Code(12) => Some(Self::StrikeOut),
            AnnotationCode::Code(_) => None,
            AnnotationCode::Name(name) => match name.trim_start_matches('/') {
                "Highlight" => Some(Self::Highlight),
                "Underline" => Some(Self::Underline),
                "Squiggly" => Some(Self::Squiggly),
                "StrikeOut" => Some(Self::StrikeOut),
                _ => None,
            },
        }
    }
}

/// A decoded highlight: where it is, what color, and its comment
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRegion {
    pub kind: AnnotationKind,
    pub color_rgb: Option<[f64; 3]>,
    /// One box per quad; empty when the annotation carries no quad data
    pub boxes: Vec<Rect>,
    pub fallback_text: Option<String>,
}

impl HighlightRegion {
    /// Decode a raw record, or `None` for unsupported annotation kinds
    pub fn from_raw(raw: &RawAnnotation) -> Option<Self> {
        let kind = raw.code().and_then(AnnotationKind::from_code)?;

        let color_rgb = match raw.color.as_deref() {
            Some(&[r, g, b, ..]) => Some([r, g, b]),
            _ => None,
        };

        Some(Self {
            kind,
            color_rgb,
            boxes: raw.quads().map(quad_boxes).unwrap_or_default(),
            fallback_text: raw.contents.clone(),
        })
    }
}
