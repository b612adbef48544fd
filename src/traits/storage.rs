//! Key-value storage trait abstraction.
//!
//! The thread store persists a single named slot through this trait so the
//! backend can be swapped for an in-memory one in tests.

use std::path::PathBuf;

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Slot names are restricted to `[A-Za-z0-9_-]`
    #[error("invalid slot name '{0}'")]
    InvalidKey(String),
    /// Stored value could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Trait for durable named slots holding string values.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Validate a slot name.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
