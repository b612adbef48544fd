//! Error handling for the chat client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Network Errors**: Transport faults talking to the chat service
//! - **Unified Error Type**: `ChatError` consolidates everything the
//!   session controller can observe
//! - **Result Type Alias**: `ChatResult<T>`
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | Non-success HTTP status | Sometimes |
//! | Client | Undecodable reply | No |
//! | System | Thread store I/O | No |

mod category;
mod chat_error;
mod network;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use network::NetworkError;

/// Result alias used across the chat service client and thread store.
pub type ChatResult<T> = Result<T, ChatError>;
