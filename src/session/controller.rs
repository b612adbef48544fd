//! Thread session controller.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::events::SessionEvent;
use crate::chat_service::ChatServiceClient;
use crate::error::ChatError;
use crate::models::{new_thread_id, Message, Thread};
use crate::thread_store::ThreadStore;

/// Thread id that never has remote history worth fetching.
pub const SENTINEL_THREAD_ID: &str = "default";

/// A failure shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Error code for the log, when the notice came from a [`ChatError`]
    pub code: Option<&'static str>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn from_error(err: &ChatError) -> Self {
        Self {
            message: err.user_message(),
            code: Some(err.error_code()),
        }
    }
}

/// View-facing state of the active session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Always set; a fresh id stands for a thread that is not saved yet
    pub active_thread_id: String,
    /// Remote history of the active thread, or the unsaved exchange so far
    pub messages: Vec<Message>,
    /// A history fetch or a send is outstanding
    pub loading: bool,
    /// A send is outstanding for the active thread
    pub sending: bool,
    pub notice: Option<Notice>,
}

impl SessionState {
    pub fn new(active_thread_id: impl Into<String>) -> Self {
        Self {
            active_thread_id: active_thread_id.into(),
            ..Default::default()
        }
    }
}

/// Keeps the displayed messages in step with exactly one remote thread and
/// promotes a new session into a saved thread after its first exchange.
///
/// Remote calls are spawned on the tokio runtime. Their completions are
/// sent back as [`SessionEvent`]s; the owner of the controller feeds them
/// to [`handle_event`](Self::handle_event).
///
/// Every history fetch and send is tagged with the thread id and a
/// selection epoch. The epoch changes whenever the active thread changes,
/// so results issued for an earlier selection are dropped even when the
/// same thread was selected again.
pub struct SessionController {
    client: ChatServiceClient,
    store: ThreadStore,
    threads: Vec<Thread>,
    state: SessionState,
    epoch: u64,
    backend_healthy: Option<bool>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<SessionEvent>>,
}

impl SessionController {
    /// Create a controller, loading the saved thread list from `store`.
    pub fn new(client: ChatServiceClient, store: ThreadStore) -> Self {
        let threads = store.load_or_default();
        info!(target: "unirag::session", count = threads.len(), "Loaded thread list");

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client,
            store,
            threads,
            state: SessionState::new(new_thread_id()),
            epoch: 0,
            backend_healthy: None,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Take the receiving end of the event channel.
    ///
    /// The UI loop takes it once and selects on it alongside terminal
    /// input. Returns `None` if already taken.
    pub fn take_event_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<SessionEvent>> {
        self.events_rx.take()
    }

    /// Wait for the next event on the internal receiver.
    ///
    /// Returns `None` once the receiver has been taken.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        match self.events_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Wait for the next event and apply it. Returns `false` if no event
    /// could be received.
    pub async fn process_next_event(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn active_thread_id(&self) -> &str {
        &self.state.active_thread_id
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_sending(&self) -> bool {
        self.state.sending
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.state.notice.as_ref()
    }

    /// Result of the last health probe, `None` before it completes.
    pub fn backend_healthy(&self) -> Option<bool> {
        self.backend_healthy
    }

    /// True when there is nothing to show and nothing on the way.
    pub fn is_welcome_visible(&self) -> bool {
        self.state.messages.is_empty() && !self.state.loading
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn client(&self) -> &ChatServiceClient {
        &self.client
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Start a fresh, unsaved thread.
    pub fn new_thread(&mut self) {
        let id = new_thread_id();
        debug!(target: "unirag::session", thread_id = %id, "New thread");
        self.activate(id);
    }

    /// Make `id` the active thread and load its history.
    pub fn select_thread(&mut self, id: &str) {
        debug!(target: "unirag::session", thread_id = id, "Select thread");
        self.activate(id.to_string());
        self.fetch_history(id);
    }

    /// Fetch remote history for `id` into the message list.
    ///
    /// Only the active thread can be fetched; other ids are ignored.
    pub fn fetch_history(&mut self, id: &str) {
        if id != self.state.active_thread_id {
            debug!(target: "unirag::session", thread_id = id, "Ignoring fetch for inactive thread");
            return;
        }
        if id == SENTINEL_THREAD_ID && self.state.messages.is_empty() {
            return;
        }

        self.state.loading = true;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let thread_id = id.to_string();
        let epoch = self.epoch;
        tokio::spawn(async move {
            let result = client.get_history(&thread_id).await;
            let _ = tx.send(SessionEvent::HistoryLoaded {
                thread_id,
                epoch,
                result,
            });
        });
    }

    /// Send `text` on the active thread.
    ///
    /// The user message is appended right away. Returns `false` without
    /// doing anything if `text` is blank or a fetch or send is outstanding.
    pub fn send_message(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        if self.state.sending || self.state.loading {
            debug!(target: "unirag::session", "Send refused while busy");
            return false;
        }

        let first_exchange = self.state.messages.is_empty();
        self.state.messages.push(Message::user(text));
        self.state.loading = true;
        self.state.sending = true;
        self.state.notice = None;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let thread_id = self.state.active_thread_id.clone();
        let prompt = text.to_string();
        let epoch = self.epoch;
        debug!(target: "unirag::session", thread_id = %thread_id, first_exchange, "Sending message");

        tokio::spawn(async move {
            let result = client.post_message(&thread_id, &prompt).await;
            let _ = tx.send(SessionEvent::ReplyReceived {
                thread_id,
                epoch,
                prompt,
                first_exchange,
                result,
            });
        });
        true
    }

    /// Forget thread `id` locally and ask the service to delete its history.
    ///
    /// The local removal stands even if the remote delete fails.
    pub fn delete_thread(&mut self, id: &str) {
        info!(target: "unirag::session", thread_id = id, "Deleting thread");

        let before = self.threads.len();
        self.threads.retain(|t| t.thread_id != id);
        if self.threads.len() != before {
            self.persist_threads();
        }

        if id == self.state.active_thread_id {
            self.new_thread();
        }

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let thread_id = id.to_string();
        tokio::spawn(async move {
            let result = client.delete_history(&thread_id).await;
            let _ = tx.send(SessionEvent::HistoryDeleted { thread_id, result });
        });
    }

    /// Probe the service's health endpoint.
    pub fn check_health(&self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let healthy = match client.health_check().await {
                Ok(healthy) => healthy,
                Err(e) => {
                    warn!(target: "unirag::session", "Health check failed: {}", e);
                    false
                }
            };
            let _ = tx.send(SessionEvent::HealthChecked { healthy });
        });
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.state.notice = Some(Notice::new(message));
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    /// Apply the result of a background call.
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::HistoryLoaded {
                thread_id,
                epoch,
                result,
            } => self.on_history_loaded(thread_id, epoch, result),
            SessionEvent::ReplyReceived {
                thread_id,
                epoch,
                prompt,
                first_exchange,
                result,
            } => self.on_reply(thread_id, epoch, &prompt, first_exchange, result),
            SessionEvent::HistoryDeleted { thread_id, result } => match result {
                Ok(()) => {
                    info!(target: "unirag::session", thread_id = %thread_id, "Remote history deleted")
                }
                Err(e) => warn!(
                    target: "unirag::session",
                    thread_id = %thread_id,
                    code = e.error_code(),
                    "Remote delete failed: {}",
                    e
                ),
            },
            SessionEvent::HealthChecked { healthy } => {
                info!(target: "unirag::session", healthy, "Chat service health");
                self.backend_healthy = Some(healthy);
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn activate(&mut self, id: String) {
        self.epoch += 1;
        self.state.active_thread_id = id;
        self.state.messages.clear();
        self.state.loading = false;
        self.state.sending = false;
    }

    fn is_current(&self, thread_id: &str, epoch: u64) -> bool {
        epoch == self.epoch && thread_id == self.state.active_thread_id
    }

    fn on_history_loaded(
        &mut self,
        thread_id: String,
        epoch: u64,
        result: Result<Vec<Message>, ChatError>,
    ) {
        if !self.is_current(&thread_id, epoch) {
            debug!(target: "unirag::session", thread_id = %thread_id, epoch, "Discarding stale history");
            return;
        }

        self.state.loading = false;
        match result {
            Ok(messages) => {
                debug!(target: "unirag::session", thread_id = %thread_id, count = messages.len(), "History loaded");
                self.state.messages = messages;
            }
            Err(e) => {
                warn!(
                    target: "unirag::session",
                    thread_id = %thread_id,
                    code = e.error_code(),
                    "Failed to load history: {}",
                    e
                );
                self.state.messages.clear();
                self.state.notice = Some(Notice::from_error(&e));
            }
        }
    }

    fn on_reply(
        &mut self,
        thread_id: String,
        epoch: u64,
        prompt: &str,
        first_exchange: bool,
        result: Result<crate::models::ChatResponse, ChatError>,
    ) {
        // The service knows the thread now, whether or not it is still shown
        if first_exchange && result.is_ok() {
            self.add_thread(Thread::from_first_message(&thread_id, prompt, Utc::now()));
        }

        if !self.is_current(&thread_id, epoch) {
            match &result {
                Ok(_) => {
                    debug!(target: "unirag::session", thread_id = %thread_id, "Reply for inactive thread discarded")
                }
                Err(e) => warn!(
                    target: "unirag::session",
                    thread_id = %thread_id,
                    "Send failed on inactive thread: {}",
                    e
                ),
            }
            return;
        }

        self.state.loading = false;
        self.state.sending = false;
        match result {
            Ok(reply) => self.state.messages.push(Message::assistant(reply.response)),
            Err(e) => {
                error!(
                    target: "unirag::session",
                    thread_id = %thread_id,
                    code = e.error_code(),
                    "Failed to send message: {}",
                    e
                );
                self.state.notice = Some(Notice::from_error(&e));
            }
        }
    }

    fn add_thread(&mut self, thread: Thread) {
        if self.threads.iter().any(|t| t.thread_id == thread.thread_id) {
            return;
        }
        info!(target: "unirag::session", thread_id = %thread.thread_id, "Thread saved");
        self.threads.insert(0, thread);
        self.persist_threads();
    }

    fn persist_threads(&mut self) {
        if let Err(e) = self.store.save(&self.threads) {
            error!(target: "unirag::session", "Failed to save thread list: {}", e);
            self.state.notice = Some(Notice::from_error(&ChatError::Storage(e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::adapters::InMemoryStore;
    use crate::models::MessageRole;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://svc";

    fn controller(mock: &MockHttpClient, store: &InMemoryStore) -> SessionController {
        let client = ChatServiceClient::new(BASE, Arc::new(mock.clone()));
        let threads = ThreadStore::new(Arc::new(store.clone()));
        SessionController::new(client, threads)
    }

    #[tokio::test]
    async fn test_starts_on_fresh_unsaved_thread() {
        let session = controller(&MockHttpClient::new(), &InMemoryStore::new());
        assert!(!session.active_thread_id().is_empty());
        assert!(session.messages().is_empty());
        assert!(session.is_welcome_visible());
        assert!(session.threads().is_empty());
    }

    #[tokio::test]
    async fn test_blank_send_is_noop() {
        let mock = MockHttpClient::new();
        let mut session = controller(&mock, &InMemoryStore::new());

        assert!(!session.send_message(""));
        assert!(!session.send_message("  \n\t "));
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_send_refused_while_sending() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/chat",
            MockResponse::json(200, json!({"response": "ok"})),
        );
        let mut session = controller(&mock, &InMemoryStore::new());

        assert!(session.send_message("first"));
        assert!(!session.send_message("second"));
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_appended_and_flags_cleared() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://svc/api/chat",
            MockResponse::json(200, json!({"response": "Hi there"})),
        );
        let mut session = controller(&mock, &InMemoryStore::new());

        session.send_message("Hello");
        assert!(session.is_sending());
        assert!(session.process_next_event().await);

        assert!(!session.is_loading());
        assert!(!session.is_sending());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, MessageRole::Assistant);
        assert_eq!(session.messages()[1].content, "Hi there");
    }

    #[tokio::test]
    async fn test_sentinel_thread_skips_fetch() {
        let mock = MockHttpClient::new();
        let mut session = controller(&mock, &InMemoryStore::new());

        session.select_thread(SENTINEL_THREAD_ID);
        assert_eq!(session.active_thread_id(), SENTINEL_THREAD_ID);
        assert!(!session.is_loading());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_for_inactive_thread_ignored() {
        let mock = MockHttpClient::new();
        let mut session = controller(&mock, &InMemoryStore::new());

        session.fetch_history("someone-else");
        assert!(!session.is_loading());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_new_thread_bumps_epoch_and_resets() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({"response": "x"})));
        let mut session = controller(&mock, &InMemoryStore::new());

        session.send_message("Hello");
        let before = session.active_thread_id().to_string();
        let epoch = session.epoch();

        session.new_thread();
        assert_ne!(session.active_thread_id(), before);
        assert_eq!(session.epoch(), epoch + 1);
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn test_notice_dismiss() {
        let mut session = controller(&MockHttpClient::new(), &InMemoryStore::new());
        session.set_notice("Copied");
        assert_eq!(session.notice().map(|n| n.message.as_str()), Some("Copied"));
        session.dismiss_notice();
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn test_health_event_updates_flag() {
        let mock = MockHttpClient::new();
        mock.set_response("http://svc/health", MockResponse::json(200, json!({"status": "ok"})));
        let mut session = controller(&mock, &InMemoryStore::new());

        assert_eq!(session.backend_healthy(), None);
        session.check_health();
        session.process_next_event().await;
        assert_eq!(session.backend_healthy(), Some(true));
    }

    #[tokio::test]
    async fn test_take_event_receiver_once() {
        let mut session = controller(&MockHttpClient::new(), &InMemoryStore::new());
        assert!(session.take_event_receiver().is_some());
        assert!(session.take_event_receiver().is_none());
        assert!(!session.process_next_event().await);
    }
}
