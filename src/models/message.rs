use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::deserialize_nullable_string;

/// Role of a message in a conversation.
///
/// The service historically labelled assistant turns `"ai"`; that label is
/// folded into [`MessageRole::Assistant`] when parsed. Any other role label
/// is kept verbatim in [`MessageRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageRole {
    User,
    Assistant,
    Other(String),
}

impl MessageRole {
    /// Parse a role label from the wire.
    pub fn from_label(label: &str) -> Self {
        match label {
            "user" => MessageRole::User,
            "assistant" | "ai" => MessageRole::Assistant,
            other => MessageRole::Other(other.to_string()),
        }
    }

    /// Canonical label for this role.
    pub fn as_str(&self) -> &str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Other(label) => label,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, MessageRole::User)
    }
}

impl Serialize for MessageRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(MessageRole::from_label(&label))
    }
}

/// One entry of a thread's message history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Who produced the message
    pub role: MessageRole,
    /// Message body (markdown)
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    /// Server-side timestamp, when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}
