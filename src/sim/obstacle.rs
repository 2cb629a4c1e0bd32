//! Obstacle pairs and their manager
//!
//! An obstacle is one column with a vertical gap. The top segment covers
//! `[0, gap_top)` and the bottom segment covers `[gap_top + gap, height)`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One obstacle pair (top and bottom segment sharing a column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge of the column
    pub x: f32,
    /// Distance from the top of the playfield to the gap
    pub gap_top: f32,
    /// Gap height, fixed at spawn
    pub gap: f32,
    /// Scroll speed (units/s), fixed at spawn
    pub speed: f32,
    /// Set once the actor has cleared the column
    pub passed: bool,
}

impl Obstacle {
    /// Top edge of the bottom segment
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Height of the bottom segment for a playfield of the given height
    pub fn bottom_height(&self, playfield_height: f32) -> f32 {
        (playfield_height - self.gap_bottom()).max(0.0)
    }

    /// Right edge of the column
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Parameters for new obstacles, taken from the active level and playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Spawn x (right edge of the playfield)
    pub x: f32,
    pub playfield_height: f32,
    pub gap: f32,
    pub speed: f32,
    pub min_margin: f32,
}

/// Valid `gap_top` interval, or `None` when the gap plus both margins does
/// not fit in the playfield
pub fn gap_top_range(playfield_height: f32, gap: f32, min_margin: f32) -> Option<(f32, f32)> {
    let min = min_margin;
    let max = playfield_height - gap - min_margin;
    if !(min.is_finite() && max.is_finite()) || gap <= 0.0 || max < min {
        return None;
    }
    Some((min, max))
}

/// Live obstacle collection with timed spawning
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Live obstacles in spawn order
    obstacles: Vec<Obstacle>,
    /// Seconds accumulated toward the next spawn
    since_spawn: f32,
    /// Seconds between spawns
    interval: f32,
    /// Column width shared by all obstacles
    width: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(width: f32, interval: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            since_spawn: 0.0,
            interval,
            width,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn since_spawn(&self) -> f32 {
        self.since_spawn
    }

    /// Drop every obstacle and restart the spawn timer
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.since_spawn = 0.0;
    }

    /// Place an obstacle with an explicit gap position
    ///
    /// Refuses geometry outside [`gap_top_range`]. Returns the new id.
    pub fn place(&mut self, params: &SpawnParams, gap_top: f32) -> Option<u32> {
        let (min, max) = gap_top_range(params.playfield_height, params.gap, params.min_margin)?;
        if !(min..=max).contains(&gap_top) {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: params.x,
            gap_top,
            gap: params.gap,
            speed: params.speed,
            passed: false,
        });
        Some(id)
    }

    /// Spawn an obstacle with a uniformly random gap position
    ///
    /// Skipped (with a warning) when the gap does not fit the playfield.
    pub fn spawn<R: Rng + ?Sized>(&mut self, params: &SpawnParams, rng: &mut R) -> Option<u32> {
        let Some((min, max)) =
            gap_top_range(params.playfield_height, params.gap, params.min_margin)
        else {
            log::warn!(
                "Spawn skipped: gap {} with margin {} does not fit playfield height {}",
                params.gap,
                params.min_margin,
                params.playfield_height
            );
            return None;
        };

        let gap_top = rng.random_range(min..=max);
        let id = self.place(params, gap_top);
        log::debug!("Spawned obstacle {:?} gap_top={:.1}", id, gap_top);
        id
    }

    /// Advance the field by `dt` seconds
    ///
    /// Spawns on cadence, scrolls every obstacle, marks pass-throughs against
    /// the actor's x and retires fully off-screen columns. Returns the ids of
    /// obstacles passed during this call, in spawn order.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        params: &SpawnParams,
        actor_x: f32,
        rng: &mut R,
    ) -> Vec<u32> {
        self.since_spawn += dt;
        if self.since_spawn >= self.interval {
            self.spawn(params, rng);
            self.since_spawn = 0.0;
        }

        let width = self.width;
        let mut passed = Vec::new();
        for obstacle in &mut self.obstacles {
            obstacle.x -= obstacle.speed * dt;
            if !obstacle.passed && obstacle.trailing_edge(width) < actor_x {
                obstacle.passed = true;
                passed.push(obstacle.id);
            }
        }

        self.obstacles.retain(|o| o.x >= -width);

        passed
    }
}
