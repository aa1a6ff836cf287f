//! In-memory store

use rustc_hash::FxHashMap;

use super::{SnapshotStore, StoreError};

/// A store that keeps snapshots in memory, with an optional failure switch for exercising
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: FxHashMap<String, String>,
    fail_saves: bool,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a snapshot.
    #[must_use]
    pub fn with_snapshot(mut self, key: &str, snapshot: &str) -> Self {
        self.snapshots.insert(key.to_string(), snapshot.to_string());
        self
    }

    /// Makes every subsequent save fail (or succeed again).
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The raw snapshot stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.snapshots.get(key).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.snapshots.get(key).cloned())
    }

    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable(format!("writes to {key} are disabled")));
        }

        self.snapshots.insert(key.to_string(), snapshot.to_string());

        Ok(())
    }
}
