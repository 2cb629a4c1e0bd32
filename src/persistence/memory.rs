//! In-memory store for native runs and tests

use std::collections::HashMap;

use super::{HighScoreStore, PersistenceError};

/// Key-value map living for the lifetime of the process
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    available: bool,
    writable: bool,
    writes: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
            writable: true,
            writes: 0,
        }
    }

    /// Store pre-filled with a raw high score value
    pub fn with_value(raw: &str) -> Self {
        let mut store = Self::new();
        store
            .values
            .insert(super::HIGH_SCORE_KEY.to_string(), raw.to_string());
        store
    }

    /// Store whose reads and writes always fail
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Readable store that rejects writes (e.g. quota exceeded)
    pub fn read_only(raw: &str) -> Self {
        Self {
            writable: false,
            ..Self::with_value(raw)
        }
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if !self.available {
            return Err(PersistenceError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if !self.available {
            return Err(PersistenceError::Unavailable);
        }
        if !self.writable {
            return Err(PersistenceError::Rejected("read-only".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
