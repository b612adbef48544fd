//! Persistent thread list.
//!
//! The list of known threads (metadata only) is stored as one JSON array
//! in a named slot of a [`KeyValueStore`]. It is read once at startup and
//! overwritten on every change.

use std::sync::Arc;

use tracing::{error, warn};

use crate::models::{StoredThread, Thread};
use crate::traits::{KeyValueStore, StorageError};

/// Slot name holding the thread list.
pub const THREADS_SLOT: &str = "chat_threads";

/// Repository for the locally persisted thread list.
#[derive(Clone)]
pub struct ThreadStore {
    backend: Arc<dyn KeyValueStore>,
    slot: String,
}

impl std::fmt::Debug for ThreadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadStore")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl ThreadStore {
    /// Create a store writing to [`THREADS_SLOT`] on `backend`.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_slot(backend, THREADS_SLOT)
    }

    /// Create a store writing to a custom slot.
    pub fn with_slot(backend: Arc<dyn KeyValueStore>, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Load the saved thread list, newest first.
    ///
    /// A slot that was never written loads as an empty list. Entries that
    /// carry neither `thread_id` nor a legacy `id` are dropped.
    pub fn load(&self) -> Result<Vec<Thread>, StorageError> {
        let Some(raw) = self.backend.read(&self.slot)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
        let mut threads = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let normalized = serde_json::from_value::<StoredThread>(entry)
                .ok()
                .and_then(StoredThread::normalize);
            match normalized {
                Some(thread) => threads.push(thread),
                None => warn!(index, "dropping stored thread without an identifier"),
            }
        }
        Ok(threads)
    }

    /// Like [`load`](Self::load) but logs failures and falls back to an
    /// empty list.
    pub fn load_or_default(&self) -> Vec<Thread> {
        match self.load() {
            Ok(threads) => threads,
            Err(e) => {
                error!("Failed to load thread list from '{}': {}", self.slot, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the saved thread list.
    pub fn save(&self, threads: &[Thread]) -> Result<(), StorageError> {
        let json = serde_json::to_string(threads)?;
        self.backend.write(&self.slot, &json)
    }
}
