//! Overlap matching
//!
//! Finds the text under each highlight by intersecting its boxes with the
//! page's text runs.

use crate::citation::{normalize_whitespace, PageBatch, Quote};
use crate::color::classify_color;
use crate::document::RawAnnotation;
use crate::layout::TextRun;

use super::types::HighlightRegion;

/// Text covered by a region
///
/// Runs are taken in content order and each run counts once even when it
/// overlaps several of the region's boxes. Falls back to the annotation's
/// comment when nothing overlaps; `None` when both are empty.
pub fn highlighted_text(region: &HighlightRegion, runs: &[TextRun], margin: f64) -> Option<String> {
    let parts: Vec<&str> = runs
        .iter()
        .filter(|run| region.boxes.iter().any(|b| run.bbox.overlaps(b, margin)))
        .map(|run| run.text.as_str())
        .collect();

    let text = normalize_whitespace(&parts.join(" "));
    if !text.is_empty() {
        return Some(text);
    }

    region
        .fallback_text
        .as_deref()
        .map(normalize_whitespace)
        .filter(|text| !text.is_empty())
}

/// Quotes for every citable annotation on a page, in annotation order
pub fn match_page(
    page: u32,
    runs: &[TextRun],
    annotations: &[RawAnnotation],
    margin: f64,
) -> PageBatch {
    let mut batch = PageBatch::new(page);

    for raw in annotations {
        let Some(region) = HighlightRegion::from_raw(raw) else {
            continue;
        };

        if region.boxes.is_empty() {
            tracing::debug!("Page {}: {:?} annotation has no quad points, skipping", page, region.kind);
            continue;
        }

        let bucket = classify_color(region.color_rgb.as_ref().map(|c| c.as_slice()));

        match highlighted_text(&region, runs, margin).and_then(|text| Quote::new(page, &text)) {
            Some(quote) => batch.push(bucket, quote),
            None => {
                tracing::debug!(
                    "Page {}: {:?} annotation covers no text and has no comment, dropping",
                    page,
                    region.kind
                );
            }
        }
    }

    batch
}
