//! File-backed key-value store adapter.
//!
//! Every slot is a JSON file named `<slot>.json` inside a root directory
//! (by default `~/.unirag`). Writes go to a temporary sibling first and
//! are renamed into place, so a crash never leaves a half-written slot.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::traits::{validate_key, KeyValueStore, StorageError};

/// File-based slot storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(&self.root, e))?;

        let tmp_path = self.root.join(format!("{}.json.tmp", key));
        fs::write(&tmp_path, value).map_err(|e| Self::io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| Self::io_error(&path, e))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
