use glam::Vec2;

use crate::core::Rect;

/// A moving axis-aligned box: top-left position, per-tick velocity and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left corner in canvas pixels
    pub position: Vec2,
    /// Displacement applied every tick
    pub velocity: Vec2,
    /// Width and height of the bounding box
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity,
            size,
        }
    }

    /// A body that does not move until something pushes it
    #[cfg(test)]
    pub fn at_rest(position: Vec2, size: Vec2) -> Self {
        Self::new(position, Vec2::ZERO, size)
    }

    /// Bounding box in canvas space
    pub fn bounds(&self) -> Rect {
        Rect::from_position(self.position, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn is_moving_left(&self) -> bool {
        self.velocity.x < 0.0
    }

    pub fn is_moving_right(&self) -> bool {
        self.velocity.x > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_follow_position() {
        let body = Body::at_rest(Vec2::new(256.0, 100.0), Vec2::new(100.0, 150.0));
        let bounds = body.bounds();
        assert_eq!(bounds.x, 256.0);
        assert_eq!(bounds.right(), 356.0);
        assert_eq!(body.bottom(), 250.0);
    }

    #[test]
    fn test_direction_helpers() {
        let mut body = Body::at_rest(Vec2::ZERO, Vec2::ONE);
        assert!(!body.is_moving_left() && !body.is_moving_right());

        body.velocity = Vec2::new(-5.0, -15.0);
        assert!(body.is_moving_left());
        assert!(!body.is_moving_right());
    }
}
