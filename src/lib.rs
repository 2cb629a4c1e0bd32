//! Flappy Levels - A side-scrolling flappy arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring, phases)
//! - `renderer`: Rendering adapter (DOM sprites on the web)
//! - `platform`: Frame clock and input mapping
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Actor defaults - horizontal position never changes during a run
    pub const ACTOR_X: f32 = 80.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Velocity set by a jump (negative = upward)
    pub const JUMP_IMPULSE: f32 = -600.0;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 1.6;
    /// Minimum solid segment height above and below a gap
    pub const MIN_MARGIN: f32 = 50.0;

    /// Rotation hint cap (degrees, nose down)
    pub const MAX_ROTATION_DEG: f32 = 90.0;
}
