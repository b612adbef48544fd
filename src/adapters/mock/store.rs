//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{validate_key, KeyValueStore, StorageError};

/// In-memory slot storage.
///
/// Clones share the same slots, so a test can keep a handle and inspect
/// what the thread store wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    write_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already populated.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Configure whether writes should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *self.write_should_fail.lock().unwrap() = should_fail;
    }

    /// Raw contents of a slot.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if *self.write_should_fail.lock().unwrap() {
            return Err(StorageError::Backend("simulated write failure".to_string()));
        }
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = InMemoryStore::new();
        assert!(store.read("slot").unwrap().is_none());
        store.write("slot", "value").unwrap();
        assert_eq!(store.read("slot").unwrap().as_deref(), Some("value"));
        store.remove("slot").unwrap();
        assert!(store.read("slot").unwrap().is_none());
    }

    #[test]
    fn test_clones_share_slots() {
        let store = InMemoryStore::new();
        let handle = store.clone();
        store.write("slot", "shared").unwrap();
        assert_eq!(handle.get("slot").as_deref(), Some("shared"));
    }

    #[test]
    fn test_write_failure() {
        let store = InMemoryStore::with_slot("slot", "before");
        store.set_write_should_fail(true);
        assert!(store.write("slot", "after").is_err());
        assert_eq!(store.get("slot").as_deref(), Some("before"));
    }
}
