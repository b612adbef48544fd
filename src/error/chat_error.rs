//! Unified error type for the chat client.
//!
//! `ChatError` folds transport faults, service rejections, undecodable
//! replies and local storage failures into one enum so the session
//! controller can log and surface them uniformly.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use crate::traits::StorageError;

/// Unified error type for the chat client.
#[derive(Debug)]
pub enum ChatError {
    /// The request never got an HTTP response.
    Network(NetworkError),

    /// The service answered with a non-success status.
    Remote { status: u16, message: String },

    /// The service answered 2xx but the body did not decode.
    InvalidResponse { message: String },

    /// The thread list could not be read or written.
    Storage(StorageError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(_) => ErrorCategory::Network,
            ChatError::Remote { .. } => ErrorCategory::Server,
            ChatError::InvalidResponse { .. } => ErrorCategory::Client,
            ChatError::Storage(_) => ErrorCategory::System,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Remote { status, message } => match *status {
                404 => "The chat service could not find that conversation.".to_string(),
                422 => format!("The chat service rejected the request: {}", message),
                500..=599 => format!("The chat service failed to answer: {}", message),
                _ => format!("The chat service returned HTTP {}: {}", status, message),
            },
            ChatError::InvalidResponse { .. } => {
                "Received an invalid response from the chat service.".to_string()
            }
            ChatError::Storage(err) => format!("Could not save your chats: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Remote { .. } => "E_REMOTE_STATUS",
            ChatError::InvalidResponse { .. } => "E_REMOTE_INVALID",
            ChatError::Storage(_) => "E_STORAGE",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// HTTP status of a service rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Remote { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ChatError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            ChatError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<StorageError> for ChatError {
    fn from(err: StorageError) -> Self {
        ChatError::Storage(err)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::InvalidResponse {
            message: err.to_string(),
        }
    }
}
