//! Persistence
//!
//! Cart and wishlist state survives between sessions as JSON snapshots held by a
//! [`SnapshotStore`]. The store only moves strings; encoding lives in [`snapshot`].

use thiserror::Error;

mod file;
mod memory;
pub mod snapshot;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key the cart snapshot is stored under.
pub const CART_KEY: &str = "cart";

/// Key the wishlist snapshot is stored under.
pub const WISHLIST_KEY: &str = "wishlist";

/// Errors raised by a snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading from or writing to the backing storage failed.
    #[error("storage error for {key}: {source}")]
    Io {
        /// Snapshot key
        key: String,

        /// Underlying IO error
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("malformed snapshot for {key}: {source}")]
    Json {
        /// Snapshot key
        key: String,

        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The store refused the write.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage for serialized snapshots.
pub trait SnapshotStore {
    /// Loads the snapshot stored under `key`, or `None` if nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        (**self).save(key, snapshot)
    }
}
