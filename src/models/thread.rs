use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_nullable_string, deserialize_optional_id};

/// Number of characters of the first message kept in a thread title.
pub const TITLE_MAX_CHARS: usize = 30;

/// Marker appended to every derived title.
pub const TITLE_ELLIPSIS: &str = "...";

/// Generate a fresh thread identifier.
pub fn new_thread_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derive a thread title from the first message sent in it.
///
/// Keeps the first [`TITLE_MAX_CHARS`] characters (not bytes) and always
/// appends [`TITLE_ELLIPSIS`].
pub fn derive_title(text: &str) -> String {
    let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}{}", head, TITLE_ELLIPSIS)
}

/// A conversation thread as recorded in the local thread store.
///
/// Only metadata lives here; message bodies stay on the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thread {
    /// Client-generated identifier, unique within the thread list
    pub thread_id: String,
    /// Title derived from the first message
    pub title: String,
    /// Creation time (RFC 3339)
    pub timestamp: String,
}

impl Thread {
    pub fn new(
        thread_id: impl Into<String>,
        title: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            title: title.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Build the record for a thread whose first exchange just succeeded.
    pub fn from_first_message(thread_id: impl Into<String>, text: &str, now: DateTime<Utc>) -> Self {
        Self {
            thread_id: thread_id.into(),
            title: derive_title(text),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// On-disk shape of a thread record, tolerant of older layouts.
///
/// Records written by earlier clients carry `id` instead of `thread_id`,
/// sometimes as a number.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StoredThread {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub thread_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub timestamp: String,
}

impl StoredThread {
    /// Normalize into a [`Thread`], falling back to the legacy `id` when
    /// `thread_id` is missing or empty. Returns `None` if neither is usable.
    pub fn normalize(self) -> Option<Thread> {
        let thread_id = self
            .thread_id
            .filter(|id| !id.is_empty())
            .or(self.id.filter(|id| !id.is_empty()))?;

        Some(Thread {
            thread_id,
            title: self.title,
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_derive_title_truncates_to_thirty_chars() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(derive_title(text), "abcdefghijklmnopqrstuvwxyz0123...");
    }

    #[test]
    fn test_derive_title_short_text_still_gets_marker() {
        assert_eq!(derive_title("Hello"), "Hello...");
    }

    #[test]
    fn test_derive_title_counts_characters_not_bytes() {
        let text = "é".repeat(40);
        let title = derive_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + TITLE_ELLIPSIS.len());
        assert!(title.starts_with(&"é".repeat(30)));
    }

    #[test]
    fn test_from_first_message() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let thread = Thread::from_first_message("t-1", "What is the leave policy?", now);
        assert_eq!(thread.thread_id, "t-1");
        assert_eq!(thread.title, "What is the leave policy?...");
        assert_eq!(thread.timestamp, "2025-03-04T05:06:07.000Z");
    }

    #[test]
    fn test_new_thread_id_is_unique() {
        let a = new_thread_id();
        let b = new_thread_id();
        assert_ne!(a, b);
        assert!(a.len() >= 5);
    }

    #[test]
    fn test_thread_serialization_shape() {
        let thread = Thread::new("t-1", "Title...", "2025-01-01T00:00:00.000Z");
        let json = serde_json::to_value(&thread).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "thread_id": "t-1",
                "title": "Title...",
                "timestamp": "2025-01-01T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_stored_thread_prefers_thread_id() {
        let stored: StoredThread =
            serde_json::from_str(r#"{"thread_id": "new", "id": "old", "title": "T"}"#).unwrap();
        assert_eq!(stored.normalize().unwrap().thread_id, "new");
    }

    #[test]
    fn test_stored_thread_legacy_id_fallback() {
        let stored: StoredThread = serde_json::from_str(r#"{"id": "abc12", "title": "Old"}"#).unwrap();
        let thread = stored.normalize().unwrap();
        assert_eq!(thread.thread_id, "abc12");
        assert_eq!(thread.title, "Old");
        assert_eq!(thread.timestamp, "");
    }

    #[test]
    fn test_stored_thread_empty_thread_id_falls_back() {
        let stored: StoredThread =
            serde_json::from_str(r#"{"thread_id": "", "id": 17, "title": "Numeric"}"#).unwrap();
        assert_eq!(stored.normalize().unwrap().thread_id, "17");
    }

    #[test]
    fn test_stored_thread_without_any_id_is_dropped() {
        let stored: StoredThread = serde_json::from_str(r#"{"title": "Orphan"}"#).unwrap();
        assert!(stored.normalize().is_none());
    }
}
