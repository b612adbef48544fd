//! Completion events produced by background chat service calls.

use crate::error::ChatError;
use crate::models::{ChatResponse, Message};

/// Results of spawned chat service calls, delivered back to the
/// [`SessionController`](super::SessionController) over an mpsc channel.
///
/// History and reply results carry the thread id and selection epoch they
/// were issued for so stale completions can be recognized and dropped.
#[derive(Debug)]
pub enum SessionEvent {
    /// History fetch finished
    HistoryLoaded {
        thread_id: String,
        epoch: u64,
        result: Result<Vec<Message>, ChatError>,
    },
    /// Reply to a sent message arrived (or the send failed)
    ReplyReceived {
        thread_id: String,
        epoch: u64,
        /// The user text that was sent
        prompt: String,
        /// The send was the first exchange of its thread
        first_exchange: bool,
        result: Result<ChatResponse, ChatError>,
    },
    /// Remote history delete finished
    HistoryDeleted {
        thread_id: String,
        result: Result<(), ChatError>,
    },
    /// Startup health probe finished
    HealthChecked { healthy: bool },
}
