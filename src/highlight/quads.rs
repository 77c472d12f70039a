//! Quad point boxes

use crate::geometry::Rect;

/// Numbers per quad: four (x, y) corners
const QUAD_LEN: usize = 8;

/// One bounding box per complete quad
///
/// Multi-line highlights carry one quad per line. A trailing partial quad is
/// ignored.
pub fn quad_boxes(quads: &[f64]) -> Vec<Rect> {
    quads
        .chunks_exact(QUAD_LEN)
        .filter_map(|quad| {
            let corners: Vec<(f64, f64)> = quad.chunks_exact(2).map(|p| (p[0], p[1])).collect();
            Rect::bounding(&corners)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quad() {
        // PDF order: upper-left, upper-right, lower-left, lower-right
        let boxes = quad_boxes(&[72.0, 712.0, 300.0, 712.0, 72.0, 700.0, 300.0, 700.0]);
        assert_eq!(boxes, vec![Rect::new(72.0, 300.0, 700.0, 712.0)]);
    }

    #[test]
    fn test_multi_line_quads() {
        let boxes = quad_boxes(&[
            72.0, 712.0, 300.0, 712.0, 72.0, 700.0, 300.0, 700.0, //
            72.0, 698.0, 150.0, 698.0, 72.0, 686.0, 150.0, 686.0,
        ]);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1], Rect::new(72.0, 150.0, 686.0, 698.0));
    }

    #[test]
    fn test_corner_order_does_not_matter() {
        let a = quad_boxes(&[0.0, 0.0, 10.0, 0.0, 0.0, 5.0, 10.0, 5.0]);
        let b = quad_boxes(&[10.0, 5.0, 0.0, 5.0, 10.0, 0.0, 0.0, 0.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_and_partial() {
        assert!(quad_boxes(&[]).is_empty());
        assert!(quad_boxes(&[1.0, 2.0, 3.0]).is_empty());
        assert_eq!(quad_boxes(&[0.0; 12]).len(), 1);
    }
}
