//! Geometry helpers
//!
//! Axis-aligned rectangles in page coordinate space and the tolerant
//! overlap test shared by text runs and highlight boxes.

use serde::{Deserialize, Serialize};

/// Default slack (in page units) applied on both sides of an interval test.
///
/// Absorbs rounding and typesetting differences between the quad points a
/// reader writes and the glyph boxes the text layer reports.
pub const DEFAULT_OVERLAP_MARGIN: f64 = 1.0;

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest rectangle containing every point
    ///
    /// Returns `None` for an empty point list.
    pub fn bounding(points: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect::new(first.0, first.0, first.1, first.1);
        for &(x, y) in rest {
            rect.x_min = rect.x_min.min(x);
            rect.x_max = rect.x_max.max(x);
            rect.y_min = rect.y_min.min(y);
            rect.y_max = rect.y_max.max(y);
        }
        Some(rect)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Both axes overlap within `margin`
    pub fn overlaps(&self, other: &Rect, margin: f64) -> bool {
        intervals_overlap(self.x_min, self.x_max, other.x_min, other.x_max, margin)
            && intervals_overlap(self.y_min, self.y_max, other.y_min, other.y_max, margin)
    }
}

/// Interval overlap with a tolerance margin on both sides:
/// `max(min_a, min_b) - margin <= min(max_a, max_b) + margin`
pub fn intervals_overlap(min_a: f64, max_a: f64, min_b: f64, max_b: f64, margin: f64) -> bool {
    min_a.max(min_b) - margin <= max_a.min(max_b) + margin
}
