//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let mock = MockHttpClient::new();
//! let session = session_with(&mock, &InMemoryStore::new());
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use unirag::chat_service::ChatServiceClient;
use unirag::session::SessionController;
use unirag::thread_store::ThreadStore;

/// Base URL used by every mock-backed client.
pub const TEST_BASE: &str = "http://unirag.test";

pub fn chat_url() -> String {
    format!("{}/api/chat", TEST_BASE)
}

pub fn history_url(thread_id: &str) -> String {
    format!("{}/api/history/{}", TEST_BASE, thread_id)
}

pub fn health_url() -> String {
    format!("{}/health", TEST_BASE)
}

/// Controller wired to the given mock transport and store.
pub fn session_with(mock: &MockHttpClient, store: &InMemoryStore) -> SessionController {
    let client = ChatServiceClient::new(TEST_BASE, Arc::new(mock.clone()));
    SessionController::new(client, ThreadStore::new(Arc::new(store.clone())))
}

/// Store pre-seeded with a saved thread list.
pub fn store_with_threads(json: &str) -> InMemoryStore {
    InMemoryStore::with_slot(unirag::thread_store::THREADS_SLOT, json)
}

/// Apply the next session event, failing the test if none arrives in time.
pub async fn apply_next(session: &mut SessionController) {
    let processed = tokio::time::timeout(Duration::from_secs(5), session.process_next_event())
        .await
        .expect("timed out waiting for session event");
    assert!(processed, "session event channel closed");
}

/// Apply `count` session events.
pub async fn apply_events(session: &mut SessionController, count: usize) {
    for _ in 0..count {
        apply_next(session).await;
    }
}
