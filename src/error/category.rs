//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors so callers
//! can decide how to surface a failure without matching every variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, timeout).
    /// Generally transient and retryable.
    Network,

    /// Chat service rejected the request (non-success HTTP status).
    Server,

    /// The service answered with something we could not decode.
    Client,

    /// Local persistence failures (filesystem, serialization).
    System,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the chat service is running and reachable",
            ErrorCategory::Server => "The chat service reported an error. Please try again",
            ErrorCategory::Client => "The chat service sent an unexpected reply",
            ErrorCategory::System => "Check permissions and free space in the data directory",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
