//! Mock implementations for test fixtures.
//!
//! Re-exports the in-crate mocks and adds response builders for the chat
//! service endpoints.

pub use unirag::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse, RecordedRequest};
pub use unirag::traits::{HttpClient, HttpError, Response};

use serde_json::json;

/// `POST /api/chat` success body.
pub fn reply(text: &str, thread_id: &str) -> MockResponse {
    MockResponse::json(200, json!({"response": text, "thread_id": thread_id}))
}

/// History body built from (role, content) pairs.
pub fn history(entries: &[(&str, &str)]) -> MockResponse {
    let items: Vec<_> = entries
        .iter()
        .map(|(role, content)| json!({"role": role, "content": content}))
        .collect();
    MockResponse::json(200, json!(items))
}

/// FastAPI-style error body.
pub fn server_error(status: u16, detail: &str) -> MockResponse {
    MockResponse::json(status, json!({"detail": detail}))
}

pub fn connection_refused() -> MockResponse {
    MockResponse::Error(HttpError::ConnectionFailed("connection refused".to_string()))
}
