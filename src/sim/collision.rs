//! Actor vs obstacle collision detection
//!
//! Axis-aligned boxes only. All comparisons are strict, so touching an edge
//! exactly is not a hit.

use glam::Vec2;

use super::actor::Actor;
use super::obstacle::Obstacle;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// Actor's box shrunk by `inset` on every side
    ///
    /// The inset is clamped so the box never inverts.
    pub fn for_actor(actor: &Actor, inset: f32) -> Self {
        let half = actor.size / 2.0;
        let inset = Vec2::splat(inset.max(0.0)).min(half);
        Self {
            min: actor.pos + inset,
            max: actor.pos + actor.size - inset,
        }
    }

    /// Strict overlap with the column `[x, x + width)`
    pub fn overlaps_column(&self, x: f32, width: f32) -> bool {
        self.min.x < x + width && self.max.x > x
    }
}

/// Does the actor hit either segment of this obstacle?
///
/// `inset` shrinks the actor's hitbox on every side (0 = exact box).
pub fn collides(actor: &Actor, obstacle: &Obstacle, obstacle_width: f32, inset: f32) -> bool {
    let hitbox = Hitbox::for_actor(actor, inset);
    if !hitbox.overlaps_column(obstacle.x, obstacle_width) {
        return false;
    }
    hitbox.min.y < obstacle.gap_top || hitbox.max.y > obstacle.gap_bottom()
}

/// Id of the first obstacle (in spawn order) the actor hits, if any
pub fn first_collision(
    actor: &Actor,
    obstacles: &[Obstacle],
    obstacle_width: f32,
    inset: f32,
) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| collides(actor, o, obstacle_width, inset))
        .map(|o| o.id)
}
