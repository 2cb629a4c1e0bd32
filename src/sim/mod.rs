//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering, audio or storage dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod levels;
pub mod obstacle;
pub mod scoring;
pub mod state;
pub mod tick;

pub use actor::{Actor, Integration};
pub use collision::{Hitbox, collides, first_collision};
pub use levels::{LEVELS, LevelConfig, MAX_LEVEL, level_config};
pub use obstacle::{Obstacle, ObstacleField, SpawnParams, gap_top_range};
pub use scoring::{Progression, ScoreOutcome};
pub use state::{GameEvent, GameOverCause, GamePhase, Session};
pub use tick::tick;
