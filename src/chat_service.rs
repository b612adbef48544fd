//! Chat service API client.
//!
//! Thin request/response wrapper around the chat backend: send a message,
//! fetch or delete a thread's history, and probe `/health`. No retries;
//! every call is a single exchange bounded by the HTTP client's timeout.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::ReqwestHttpClient;
use crate::error::{ChatError, ChatResult, NetworkError};
use crate::models::{ChatRequest, ChatResponse, HealthResponse, Message};
use crate::startup::ClientConfig;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Address of a locally running chat backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Client for the chat backend's REST API.
#[derive(Clone)]
pub struct ChatServiceClient {
    /// Base URL without a trailing slash
    pub base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ChatServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatServiceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ChatServiceClient {
    /// Create a client for `base_url` over the given transport.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Create a client using the configured URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        Ok(Self::new(config.api_url.clone(), Arc::new(http)))
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn history_url(&self, thread_id: &str) -> String {
        format!(
            "{}/api/history/{}",
            self.base_url,
            urlencoding::encode(thread_id)
        )
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    /// Send `text` as the next user message of `thread_id`.
    ///
    /// `POST /api/chat` with `{message, thread_id}`; returns the assistant
    /// reply.
    pub async fn post_message(&self, thread_id: &str, text: &str) -> ChatResult<ChatResponse> {
        let url = self.chat_url();
        let body = serde_json::to_string(&ChatRequest::new(thread_id, text))?;
        debug!(target: "unirag::client", thread_id, "POST {}", url);

        let response = self
            .http
            .post(&url, &body, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        Ok(check_status(response)?.json::<ChatResponse>()?)
    }

    /// Fetch the full message history of `thread_id`.
    pub async fn get_history(&self, thread_id: &str) -> ChatResult<Vec<Message>> {
        let url = self.history_url(thread_id);
        debug!(target: "unirag::client", thread_id, "GET {}", url);

        let response = self
            .http
            .get(&url, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        Ok(check_status(response)?.json::<Vec<Message>>()?)
    }

    /// Delete the server-side history of `thread_id`.
    ///
    /// The response body (`{status, thread_id}`) is not inspected.
    pub async fn delete_history(&self, thread_id: &str) -> ChatResult<()> {
        let url = self.history_url(thread_id);
        debug!(target: "unirag::client", thread_id, "DELETE {}", url);

        let response = self
            .http
            .delete(&url, &Self::json_headers())
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        check_status(response)?;
        Ok(())
    }

    /// Check if the chat backend is healthy and reachable.
    ///
    /// # Returns
    /// `true` if `/health` answers 2xx with `{"status": "ok"}`
    pub async fn health_check(&self) -> ChatResult<bool> {
        let url = self.health_url();

        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        if !response.is_success() {
            warn!(target: "unirag::client", status = response.status, "health check failed");
            return Ok(false);
        }

        // Older backends answer with an empty body
        match response.json::<HealthResponse>() {
            Ok(health) => Ok(health.is_ok()),
            Err(_) => Ok(true),
        }
    }
}

/// Turn a non-2xx response into [`ChatError::Remote`].
fn check_status(response: Response) -> ChatResult<Response> {
    if response.is_success() {
        return Ok(response);
    }
    let status = response.status;
    let message = error_detail(&response);
    Err(ChatError::Remote { status, message })
}

/// Pull a readable message out of an error body.
///
/// The backend reports failures as `{"detail": "..."}`; anything else is
/// returned as raw text.
fn error_detail(response: &Response) -> String {
    if let Ok(value) = response.json::<serde_json::Value>() {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    match response.text() {
        Ok(text) if !text.trim().is_empty() => text,
        _ => "Unknown error".to_string(),
    }
}
