//! Game balance and playfield configuration
//!
//! Persisted separately from the high score in LocalStorage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::levels::{LEVELS, MAX_LEVEL};

/// Rejected configuration
#[derive(Debug)]
pub enum ConfigError {
    /// A size, rate or interval that must be positive and finite is not
    NotPositive { field: &'static str, value: f32 },
    /// Jump impulse must point upward (negative)
    JumpNotUpward(f32),
    /// Actor box or x position does not fit inside the playfield
    ActorOutsidePlayfield,
    /// Start level outside 1..=10
    LevelOutOfRange(u32),
    /// A level's gap plus both margins is taller than the playfield
    GapDoesNotFit {
        level: u32,
        gap: f32,
        playfield_height: f32,
    },
    /// Malformed JSON
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be positive and finite (got {})", field, value)
            }
            ConfigError::JumpNotUpward(v) => {
                write!(f, "jump_impulse must be negative (got {})", v)
            }
            ConfigError::ActorOutsidePlayfield => write!(f, "actor does not fit in the playfield"),
            ConfigError::LevelOutOfRange(l) => {
                write!(f, "level {} is outside 1..={}", l, MAX_LEVEL)
            }
            ConfigError::GapDoesNotFit {
                level,
                gap,
                playfield_height,
            } => write!(
                f,
                "level {} gap {} plus margins does not fit playfield height {}",
                level, gap, playfield_height
            ),
            ConfigError::Json(e) => write!(f, "invalid tuning JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// All gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Actor ===
    /// Fixed horizontal position of the actor's left edge
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Velocity set by a jump (negative = upward)
    pub jump_impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Minimum segment height above and below every gap
    pub min_margin: f32,

    // === Collision ===
    /// Hitbox shrink per side (0 = exact box)
    pub hitbox_inset: f32,

    // === Progression ===
    /// Level a run starts at unless another is selected
    pub start_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            spawn_interval: SPAWN_INTERVAL,
            min_margin: MIN_MARGIN,

            hitbox_inset: 0.0,

            start_level: 1,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl Tuning {
    /// Check every rule a playable configuration must satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("actor_width", self.actor_width)?;
        positive("actor_height", self.actor_height)?;
        positive("gravity", self.gravity)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("spawn_interval", self.spawn_interval)?;

        if !(self.min_margin.is_finite() && self.min_margin >= 0.0) {
            return Err(ConfigError::NotPositive {
                field: "min_margin",
                value: self.min_margin,
            });
        }
        if !(self.hitbox_inset.is_finite() && self.hitbox_inset >= 0.0) {
            return Err(ConfigError::NotPositive {
                field: "hitbox_inset",
                value: self.hitbox_inset,
            });
        }
        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(ConfigError::JumpNotUpward(self.jump_impulse));
        }

        let actor_fits = self.actor_x.is_finite()
            && self.actor_x >= 0.0
            && self.actor_x + self.actor_width <= self.playfield_width
            && self.actor_height < self.playfield_height / 2.0;
        if !actor_fits {
            return Err(ConfigError::ActorOutsidePlayfield);
        }

        if !(1..=MAX_LEVEL).contains(&self.start_level) {
            return Err(ConfigError::LevelOutOfRange(self.start_level));
        }

        for level in &LEVELS {
            if level.gap + 2.0 * self.min_margin > self.playfield_height {
                return Err(ConfigError::GapDoesNotFit {
                    level: level.level,
                    gap: level.gap,
                    playfield_height: self.playfield_height,
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_levels_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub: nothing persisted, defaults apply
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_native_load_uses_defaults() {
        assert_eq!(Tuning::load(), Tuning::default());
    }

    #[test]
    fn test_rejects_non_positive_fields() {
        let t = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ConfigError::NotPositive { field: "gravity", .. })
        ));

        let t = Tuning {
            spawn_interval: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ConfigError::NotPositive {
                field: "spawn_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let t = Tuning {
            jump_impulse: 600.0,
            ..Default::default()
        };
        assert!(matches!(t.validate(), Err(ConfigError::JumpNotUpward(_))));
    }

    #[test]
    fn test_rejects_gap_that_cannot_fit() {
        let t = Tuning {
            playfield_height: 250.0,
            ..Default::default()
        };
        match t.validate() {
            Err(ConfigError::GapDoesNotFit { level, gap, .. }) => {
                assert_eq!(level, 1);
                assert_eq!(gap, 200.0);
            }
            other => panic!("expected GapDoesNotFit, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_actor_outside() {
        let t = Tuning {
            actor_x: 390.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ConfigError::ActorOutsidePlayfield)
        ));
    }

    #[test]
    fn test_rejects_bad_start_level() {
        let t = Tuning {
            start_level: 11,
            ..Default::default()
        };
        assert!(matches!(t.validate(), Err(ConfigError::LevelOutOfRange(11))));
    }

    #[test]
    fn test_json_partial_document_uses_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 1500.0, "hitbox_inset": 10.0 }"#)
            .expect("valid tuning");
        assert_eq!(t.gravity, 1500.0);
        assert_eq!(t.hitbox_inset, 10.0);
        assert_eq!(t.playfield_height, PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "jump_impulse": 10.0 }"#),
            Err(ConfigError::JumpNotUpward(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let t = Tuning {
            spawn_interval: 1.2,
            start_level: 4,
            ..Default::default()
        };
        let json = t.to_json().expect("serializable");
        assert_eq!(Tuning::from_json(&json).expect("valid"), t);
    }
}
