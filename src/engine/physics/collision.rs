use parry2d::bounding_volume::{Aabb, BoundingVolume};
use parry2d::math::Point;

use crate::core::Rect;

/// Convert a canvas rectangle into a parry bounding box
pub fn to_aabb(rect: &Rect) -> Aabb {
    Aabb::new(
        Point::new(rect.x, rect.y),
        Point::new(rect.right(), rect.bottom()),
    )
}

/// Whether two rectangles overlap on both axes.
///
/// Edges count: boxes that exactly touch overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    to_aabb(a).intersects(&to_aabb(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0.0, 0.0, 150.0, 80.0);
        let b = Rect::new(100.0, 50.0, 100.0, 150.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let hit_box = Rect::new(0.0, 0.0, 150.0, 80.0);
        let body = Rect::new(150.0, 80.0, 100.0, 150.0);
        assert!(overlaps(&hit_box, &body));
    }

    #[test]
    fn test_one_pixel_gap_is_a_miss() {
        let hit_box = Rect::new(0.0, 0.0, 150.0, 80.0);
        let right_of = Rect::new(151.0, 0.0, 100.0, 150.0);
        let below = Rect::new(0.0, 81.0, 100.0, 150.0);
        assert!(!overlaps(&hit_box, &right_of));
        assert!(!overlaps(&hit_box, &below));
    }

    #[test]
    fn test_horizontal_overlap_alone_is_not_enough() {
        let a = Rect::new(0.0, 0.0, 150.0, 80.0);
        let b = Rect::new(50.0, 300.0, 100.0, 150.0);
        assert!(!overlaps(&a, &b));
    }
}
