//! Text layout mapping
//!
//! Turns raw text-layer items into [`TextRun`]s with axis-aligned boxes.

use serde::Serialize;

use crate::document::RawTextItem;
use crate::geometry::Rect;

/// Minimum glyph height, keeps boxes from collapsing to a line
const MIN_FONT_HEIGHT: f64 = 1.0;

/// Average glyph advance as a fraction of the font height, used when the
/// backend reports no width
const AVERAGE_ADVANCE: f64 = 0.5;

/// A positioned run of text on one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bbox: Rect,
}

/// Map one raw item to a run
pub fn map_text_item(item: &RawTextItem) -> TextRun {
    let [_, _, c, d, x, y] = item.effective_transform();

    let font_height = c.hypot(d).max(MIN_FONT_HEIGHT);

    let width = match item.width {
        Some(width) if width.is_finite() => width,
        _ => {
            let chars = item.text.chars().count();
            if chars > 0 {
                chars as f64 * font_height * AVERAGE_ADVANCE
            } else {
                font_height
            }
        }
    };

    TextRun {
        text: item.text.clone(),
        bbox: Rect::new(x, x + width, y, y + font_height),
    }
}

/// Map a page's items, preserving content order
pub fn map_text_items(items: &[RawTextItem]) -> Vec<TextRun> {
    items.iter().map(map_text_item).collect()
}

/// Concatenated native text of a page, used to detect scanned pages
pub fn native_text(runs: &[TextRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_width() {
        let item = RawTextItem::new("Hello", [12.0, 0.0, 0.0, 12.0, 72.0, 700.0], Some(30.0));
        let run = map_text_item(&item);
        assert_eq!(run.text, "Hello");
        assert_eq!(run.bbox, Rect::new(72.0, 102.0, 700.0, 712.0));
    }

    #[test]
    fn test_estimated_width_from_char_count() {
        let item = RawTextItem::new("abcd", [10.0, 0.0, 0.0, 10.0, 0.0, 0.0], None);
        let run = map_text_item(&item);
        // 4 chars * 10 * 0.5
        assert_eq!(run.bbox.width(), 20.0);
        assert_eq!(run.bbox.height(), 10.0);
    }

    #[test]
    fn test_estimate_counts_chars_not_bytes() {
        let item = RawTextItem::new("ação", [10.0, 0.0, 0.0, 10.0, 0.0, 0.0], None);
        assert_eq!(map_text_item(&item).bbox.width(), 20.0);
    }

    #[test]
    fn test_empty_text_uses_font_height() {
        let item = RawTextItem::new("", [8.0, 0.0, 0.0, 8.0, 5.0, 5.0], None);
        assert_eq!(map_text_item(&item).bbox.width(), 8.0);
    }

    #[test]
    fn test_rotated_basis_magnitude() {
        // Vertical basis (c, d) = (-6, 8) has length 10
        let item = RawTextItem::new("", [8.0, 6.0, -6.0, 8.0, 0.0, 0.0], Some(1.0));
        assert_eq!(map_text_item(&item).bbox.height(), 10.0);
    }

    #[test]
    fn test_font_height_floor() {
        let item = RawTextItem::new("x", [0.0, 0.0, 0.0, 0.2, 0.0, 0.0], None);
        let run = map_text_item(&item);
        assert_eq!(run.bbox.height(), 1.0);
        assert_eq!(run.bbox.width(), 0.5);
    }

    #[test]
    fn test_missing_transform_is_identity() {
        let item = RawTextItem {
            text: "ab".to_string(),
            ..Default::default()
        };
        let run = map_text_item(&item);
        assert_eq!(run.bbox, Rect::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_native_text_concatenates_in_order() {
        let runs = map_text_items(&[
            RawTextItem::new("one ", [1.0, 0.0, 0.0, 1.0, 0.0, 0.0], None),
            RawTextItem::new("two", [1.0, 0.0, 0.0, 1.0, 0.0, 0.0], None),
        ]);
        assert_eq!(native_text(&runs), "one two");
    }
}
