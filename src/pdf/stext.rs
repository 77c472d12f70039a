//! Structured text
//!
//! Native text runs come from MuPDF's structured text, one item per line.
//! MuPDF resolves font encodings, `/ToUnicode` maps and glyph widths, so the
//! line bounds are real glyph bounds.

use mupdf::{Page, TextPageOptions};

use crate::document::{RawTextItem, Result};

/// Where a page sits in PDF user space
///
/// MuPDF measures from the top-left corner of the page with y growing down;
/// annotation quad points use the bottom-left MediaBox origin with y growing
/// up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageFrame {
    /// Lower-left corner of the MediaBox
    pub origin_x: f64,
    pub origin_y: f64,
    /// Page height in points
    pub height: f64,
}

impl PageFrame {
    pub fn new(origin: (f64, f64), height: f64) -> Self {
        Self {
            origin_x: origin.0,
            origin_y: origin.1,
            height,
        }
    }
}

/// A line as a raw text item in PDF user space
///
/// `bounds` are MuPDF coordinates `[x0, y0, x1, y1]`. The transform carries
/// the line height as font size and the bottom-left corner as origin.
/// Whitespace-only lines yield `None`.
pub(crate) fn line_item(text: &str, bounds: [f32; 4], frame: &PageFrame) -> Option<RawTextItem> {
    if text.trim().is_empty() {
        return None;
    }

    let [x0, y0, x1, y1] = bounds.map(f64::from);
    let height = (y1 - y0).abs();
    let x = frame.origin_x + x0.min(x1);
    let y = frame.origin_y + frame.height - y0.max(y1);

    Some(RawTextItem::new(
        text,
        [height, 0.0, 0.0, height, x, y],
        Some((x1 - x0).abs()),
    ))
}

/// Text items of a page, in reading order
pub fn page_text_items(page: &Page, origin: (f64, f64)) -> Result<Vec<RawTextItem>> {
    let bounds = page.bounds()?;
    let frame = PageFrame::new(origin, f64::from(bounds.y1 - bounds.y0));

    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut items = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let text: String = line.chars().filter_map(|ch| ch.char()).collect();
            let b = line.bounds();
            if let Some(item) = line_item(&text, [b.x0, b.y0, b.x1, b.y1], &frame) {
                items.push(item);
            }
        }
    }

    Ok(items)
}
