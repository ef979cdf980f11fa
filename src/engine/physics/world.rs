use super::body::Body;
use crate::core::math::approx_equal;

/// Tolerance used when deciding whether a body stands on the ground line
const GROUND_EPSILON: f32 = 0.01;

/// The single-plane arena: vertical gravity, a ground line and two side walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsWorld {
    /// Added to vertical velocity every tick while airborne
    gravity: f32,
    /// Right wall; the left wall is x = 0
    width: f32,
    /// Y coordinate the feet of a body rest on
    ground_y: f32,
}

impl PhysicsWorld {
    pub fn new(width: f32, ground_y: f32, gravity: f32) -> Self {
        Self {
            gravity,
            width,
            ground_y,
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Move the body by its velocity, then apply gravity or land it.
    pub fn integrate(&self, body: &mut Body) {
        body.position += body.velocity;

        if body.bottom() + body.velocity.y >= self.ground_y {
            body.velocity.y = 0.0;
            body.position.y = self.ground_y - body.size.y;
        } else {
            body.velocity.y += self.gravity;
        }
    }

    /// A body is grounded when its bottom edge is on (or below) the ground line
    pub fn is_grounded(&self, body: &Body) -> bool {
        body.bottom() >= self.ground_y || approx_equal(body.bottom(), self.ground_y, GROUND_EPSILON)
    }

    /// Zero horizontal velocity when the body touches a wall it is moving into.
    /// Returns true if the body was stopped.
    pub fn stop_at_walls(&self, body: &mut Body) -> bool {
        let at_left_wall = body.position.x <= 0.0 && body.is_moving_left();
        let at_right_wall = body.right() >= self.width && body.is_moving_right();

        if at_left_wall || at_right_wall {
            body.velocity.x = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(1024.0, 480.0, 0.6)
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let world = world();
        let mut body = Body::at_rest(Vec2::new(100.0, 0.0), Vec2::new(100.0, 150.0));

        world.integrate(&mut body);
        assert_relative_eq!(body.velocity.y, 0.6);
        world.integrate(&mut body);
        assert_relative_eq!(body.position.y, 0.6);
        assert_relative_eq!(body.velocity.y, 1.2);
    }

    #[test]
    fn test_body_lands_on_ground_line() {
        let world = world();
        let mut body = Body::at_rest(Vec2::new(100.0, 0.0), Vec2::new(100.0, 150.0));

        for _ in 0..200 {
            world.integrate(&mut body);
        }

        assert_relative_eq!(body.bottom(), 480.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(world.is_grounded(&body));
    }

    #[test]
    fn test_airborne_body_is_not_grounded() {
        let world = world();
        let body = Body::at_rest(Vec2::new(100.0, 200.0), Vec2::new(100.0, 150.0));
        assert!(!world.is_grounded(&body));
    }

    #[test]
    fn test_left_wall_stops_leftward_motion() {
        let world = world();
        let mut body = Body::new(Vec2::new(0.0, 330.0), Vec2::new(-5.0, 0.0), Vec2::new(100.0, 150.0));

        assert!(world.stop_at_walls(&mut body));
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_right_wall_stops_rightward_motion() {
        let world = world();
        let mut body = Body::new(Vec2::new(924.0, 330.0), Vec2::new(5.0, -3.0), Vec2::new(100.0, 150.0));

        assert!(world.stop_at_walls(&mut body));
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.velocity.y, -3.0);
    }

    #[test]
    fn test_walls_do_not_block_moving_away() {
        let world = world();
        let mut body = Body::new(Vec2::new(0.0, 330.0), Vec2::new(5.0, 0.0), Vec2::new(100.0, 150.0));

        assert!(!world.stop_at_walls(&mut body));
        assert_eq!(body.velocity.x, 5.0);
    }
}
