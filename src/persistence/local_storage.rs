//! Browser LocalStorage backend

use web_sys::Storage;

use super::{ScoreStore, parse_score};
use crate::consts::HIGH_SCORE_KEY;

/// Best score kept under a LocalStorage key as plain integer text
pub struct LocalStorageStore {
    storage: Option<Storage>,
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(HIGH_SCORE_KEY)
    }
}

impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best score will not persist");
        }
        Self {
            storage,
            key: key.to_string(),
        }
    }
}

impl ScoreStore for LocalStorageStore {
    fn get_high_score(&self) -> Option<u32> {
        let storage = self.storage.as_ref()?;
        let raw = storage.get_item(&self.key).ok()??;
        let score = parse_score(&raw);
        if score.is_none() {
            log::warn!("Ignoring corrupt best score {:?}", raw);
        }
        score
    }

    fn set_high_score(&mut self, score: u32) {
        let Some(storage) = &self.storage else { return };
        if storage.set_item(&self.key, &score.to_string()).is_err() {
            log::warn!("Failed to save best score");
        }
    }
}
