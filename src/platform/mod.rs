//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (delta time between animation frames)
//! - Input events (keys, clicks and taps mapped to game commands)
//!
//! Storage lives in `crate::persistence`.

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::Command;
