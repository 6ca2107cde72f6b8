//! Best score persistence
//!
//! The game only ever stores one integer. Reads that fail or return junk
//! come back as `None`; writes that fail are logged and dropped.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Get/set of the persisted best score
pub trait ScoreStore {
    fn get_high_score(&self) -> Option<u32>;
    fn set_high_score(&mut self, score: u32);
}

/// Parse a stored score; anything that is not a non-negative integer is absent
pub fn parse_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of `set_high_score` calls seen
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn get_high_score(&self) -> Option<u32> {
        self.value
    }

    fn set_high_score(&mut self, score: u32) {
        self.value = Some(score);
        self.writes += 1;
    }
}
