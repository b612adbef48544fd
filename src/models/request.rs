use serde::{Deserialize, Serialize};

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message text, sent verbatim
    pub message: String,
    /// Thread the message belongs to
    pub thread_id: String,
}

impl ChatRequest {
    pub fn new(thread_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// Assistant reply (markdown)
    pub response: String,
    /// Echo of the thread id (older service versions omit it)
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest::new("thread-1", "Hello there");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Hello there", "thread_id": "thread-1"})
        );
    }

    #[test]
    fn test_chat_response_without_thread_id() {
        let response: ChatResponse = serde_json::from_str(r#"{"response": "Hi"}"#).unwrap();
        assert_eq!(response.response, "Hi");
        assert_eq!(response.thread_id, None);
    }

    #[test]
    fn test_chat_response_with_thread_id() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"response": "Hi", "thread_id": "t-9"}"#).unwrap();
        assert_eq!(response.thread_id.as_deref(), Some("t-9"));
    }

    #[test]
    fn test_health_response() {
        let ok: HealthResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(ok.is_ok());
        let degraded: HealthResponse = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!degraded.is_ok());
    }
}
