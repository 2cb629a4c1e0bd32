//! High score persistence
//!
//! Backends are plain key-value stores. Parsing, defaults and failure
//! handling live here so every backend degrades the same way:
//! - Missing or invalid values read as a zero score
//! - Failed writes are logged and the in-memory score stays authoritative

use std::fmt;

use crate::highscores::HighScore;
use crate::sim::GameEvent;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "flappyHigh";

/// Storage backend failure
#[derive(Debug)]
pub enum PersistenceError {
    /// No storage available (private mode, disabled, not in a browser)
    Unavailable,
    /// Storage refused the operation (quota, security)
    Rejected(String),
    /// Record could not be encoded
    Encode(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Unavailable => write!(f, "storage unavailable"),
            PersistenceError::Rejected(msg) => write!(f, "storage rejected write: {}", msg),
            PersistenceError::Encode(e) => write!(f, "could not encode high score: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

/// Raw key-value storage for the high score
pub trait HighScoreStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Stored record, or the zero record when absent, unreadable or invalid
    fn load_record(&self) -> HighScore {
        match self.read(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => HighScore::parse(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring invalid stored high score {:?}", raw);
                HighScore::default()
            }),
            Ok(None) => HighScore::default(),
            Err(e) => {
                log::warn!("High score unavailable ({}), starting from 0", e);
                HighScore::default()
            }
        }
    }

    /// Stored best score (0 when absent or invalid)
    fn load_high_score(&self) -> u32 {
        self.load_record().score
    }

    fn save_record(&mut self, record: &HighScore) -> Result<(), PersistenceError> {
        let json = record.to_json().map_err(PersistenceError::Encode)?;
        self.write(HIGH_SCORE_KEY, &json)
    }
}

/// Write a new best score for every `NewHighScore` event in `events`
///
/// A stored record that is already at least as high (another tab) is kept.
/// Failures are logged and swallowed. Returns the number of records saved.
pub fn persist_high_scores(
    store: &mut dyn HighScoreStore,
    events: &[GameEvent],
    level: u32,
    now_ms: f64,
) -> usize {
    let mut saved = 0;
    for event in events {
        if let GameEvent::NewHighScore(score) = *event {
            let stored = store.load_record();
            if !stored.beaten_by(score) {
                log::info!("Stored best {} already beats {}", stored.score, score);
                continue;
            }
            let record = HighScore::new(score, level, now_ms);
            match store.save_record(&record) {
                Ok(()) => {
                    log::info!("High score {} saved", score);
                    saved += 1;
                }
                Err(e) => log::warn!("High score {} kept in memory only: {}", score, e),
            }
        }
    }
    saved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_to_zero() {
        assert_eq!(MemoryStore::new().load_high_score(), 0);
        assert_eq!(MemoryStore::unavailable().load_high_score(), 0);
        assert_eq!(MemoryStore::with_value("banana").load_high_score(), 0);
    }

    #[test]
    fn test_load_legacy_integer() {
        assert_eq!(MemoryStore::with_value("23").load_high_score(), 23);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        store
            .save_record(&HighScore::new(8, 2, 5.0))
            .expect("memory store accepts writes");
        assert_eq!(store.load_record(), HighScore::new(8, 2, 5.0));
    }

    #[test]
    fn test_persist_only_on_new_high_score() {
        let mut store = MemoryStore::new();
        let events = [
            GameEvent::ScoreChanged(4),
            GameEvent::GameOver {
                final_score: 4,
                high_score: 9,
            },
        ];
        assert_eq!(persist_high_scores(&mut store, &events, 1, 0.0), 0);
        assert_eq!(store.writes(), 0);

        let events = [
            GameEvent::NewHighScore(12),
            GameEvent::GameOver {
                final_score: 12,
                high_score: 12,
            },
        ];
        assert_eq!(persist_high_scores(&mut store, &events, 3, 77.0), 1);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.load_record(), HighScore::new(12, 3, 77.0));
    }

    #[test]
    fn test_higher_stored_record_is_kept() {
        let mut store = MemoryStore::with_value(r#"{"score":50,"level":6,"timestamp":9.0}"#);
        let events = [GameEvent::NewHighScore(12)];
        assert_eq!(persist_high_scores(&mut store, &events, 3, 77.0), 0);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.load_record(), HighScore::new(50, 6, 9.0));
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut store = MemoryStore::read_only("5");
        let events = [GameEvent::NewHighScore(6)];
        assert_eq!(persist_high_scores(&mut store, &events, 1, 0.0), 0);
        assert_eq!(store.load_high_score(), 5);
    }
}
