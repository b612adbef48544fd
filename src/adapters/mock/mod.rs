//! Mock implementations for testing.
//!
//! These stand in for the network and the filesystem so the session
//! controller can be exercised deterministically.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses and latency
//! - [`InMemoryStore`] - In-memory slot storage

pub mod http;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use store::InMemoryStore;
