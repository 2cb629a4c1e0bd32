//! Browser LocalStorage backend

use web_sys::Storage;

use super::{HighScoreStore, PersistenceError};

/// `window.localStorage`, if the browser grants it
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

impl HighScoreStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let storage = self.storage.as_ref().ok_or(PersistenceError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| PersistenceError::Rejected(format!("{:?}", e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let storage = self.storage.as_ref().ok_or(PersistenceError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| PersistenceError::Rejected(format!("{:?}", e)))
    }
}
