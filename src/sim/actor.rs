//! Falling actor physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ROTATION_DEG;

/// Result of integrating the actor for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    /// Actor is still inside the playfield
    InBounds,
    /// Actor's bottom edge passed the playfield floor
    OutOfBounds,
}

/// The player-controlled character
///
/// `pos` is the top-left corner of the bounding box in playfield units
/// (y grows downward). `pos.x` is fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Vertical velocity (units/s, positive = falling)
    pub vel_y: f32,
    /// Bounding box width/height
    pub size: Vec2,
}

impl Actor {
    /// Actor at rest, vertically centred in the playfield
    pub fn new(x: f32, size: Vec2, playfield_height: f32) -> Self {
        Self {
            pos: Vec2::new(x, playfield_height / 2.0),
            vel_y: 0.0,
            size,
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Advance velocity then position under constant gravity
    ///
    /// Hitting the ceiling clamps the position but keeps the velocity, so an
    /// upward-moving actor sticks to the top until gravity turns it around.
    pub fn integrate(&mut self, dt: f32, gravity: f32, playfield_height: f32) -> Integration {
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }

        if self.pos.y + self.size.y > playfield_height {
            Integration::OutOfBounds
        } else {
            Integration::InBounds
        }
    }

    /// Overwrite vertical velocity with the jump impulse
    pub fn jump(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }

    /// Tilt for drawing, in degrees (nose up when rising, capped nose down)
    pub fn rotation_hint(&self) -> f32 {
        (self.vel_y / 6.0).min(MAX_ROTATION_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actor() -> Actor {
        Actor::new(80.0, Vec2::new(34.0, 24.0), 600.0)
    }

    #[test]
    fn test_new_is_centred_at_rest() {
        let a = actor();
        assert_eq!(a.pos, Vec2::new(80.0, 300.0));
        assert_eq!(a.vel_y, 0.0);
    }

    #[test]
    fn test_integrate_applies_velocity_after_gravity() {
        let mut a = actor();
        let result = a.integrate(0.1, 2000.0, 600.0);
        assert_eq!(result, Integration::InBounds);
        assert!((a.vel_y - 200.0).abs() < 1e-4);
        assert!((a.pos.y - 320.0).abs() < 1e-3);
    }

    #[test]
    fn test_ceiling_clamps_position_keeps_velocity() {
        let mut a = actor();
        a.pos.y = 5.0;
        a.jump(-600.0);
        assert_eq!(a.integrate(0.1, 2000.0, 600.0), Integration::InBounds);
        assert_eq!(a.pos.y, 0.0);
        assert!((a.vel_y - (-400.0)).abs() < 1e-4);
    }

    #[test]
    fn test_floor_is_out_of_bounds() {
        let mut a = actor();
        a.pos.y = 570.0;
        a.vel_y = 100.0;
        assert_eq!(a.integrate(0.1, 2000.0, 600.0), Integration::OutOfBounds);
    }

    #[test]
    fn test_touching_floor_is_in_bounds() {
        let mut a = actor();
        a.pos.y = 576.0;
        assert_eq!(a.integrate(0.0, 2000.0, 600.0), Integration::InBounds);
    }

    #[test]
    fn test_rotation_hint_is_capped() {
        let mut a = actor();
        a.vel_y = -600.0;
        assert_eq!(a.rotation_hint(), -100.0);
        a.vel_y = 1200.0;
        assert_eq!(a.rotation_hint(), 90.0);
    }

    proptest! {
        #[test]
        fn prop_gravity_accumulates(vel in -800.0f32..800.0, dt in 0.001f32..0.1) {
            let mut a = actor();
            a.pos.y = 100.0;
            a.vel_y = vel;
            a.integrate(dt, 2000.0, 1.0e9);
            prop_assert!((a.vel_y - (vel + 2000.0 * dt)).abs() < 1e-2);
            prop_assert!(a.vel_y > vel);
        }

        #[test]
        fn prop_jump_overwrites_velocity(vel in -5000.0f32..5000.0) {
            let mut a = actor();
            a.vel_y = vel;
            a.jump(-600.0);
            prop_assert_eq!(a.vel_y, -600.0);
            a.jump(-600.0);
            prop_assert_eq!(a.vel_y, -600.0);
        }
    }
}
