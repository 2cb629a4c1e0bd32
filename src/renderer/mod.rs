//! Rendering adapter
//!
//! The simulation only holds geometry. This module snapshots it into plain
//! view structs and keeps one drawable handle per live obstacle.

pub mod sprites;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use sprites::{SpriteCanvas, SpriteSync};
pub use view::{ActorView, FrameView, ObstacleView};

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
