//! File-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{SnapshotStore, StoreError};

/// Stores each snapshot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory snapshots are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;

        // Write beside the target then rename so a failed write never truncates the old file.
        let target = self.path(key);
        let staging = target.with_extension("json.tmp");

        fs::write(&staging, snapshot).map_err(io_error)?;
        fs::rename(&staging, &target).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_snapshot_loads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.load("cart")?, None);

        Ok(())
    }

    #[test]
    fn save_creates_directory_and_overwrites() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path().join("state"));

        store.save("wishlist", "[]")?;
        store.save("wishlist", "[{\"id\":1}]")?;

        assert_eq!(store.load("wishlist")?, Some("[{\"id\":1}]".to_string()));
        assert!(dir.path().join("state").join("wishlist.json").exists());
        assert!(!dir.path().join("state").join("wishlist.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn unreadable_snapshot_is_an_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("cart.json"))?;
        let store = FileStore::new(dir.path());

        assert!(matches!(store.load("cart"), Err(StoreError::Io { .. })));

        Ok(())
    }
}
