//! Copying replies to the system clipboard.
//!
//! Picks what to copy from the conversation (the last code block of the
//! latest assistant reply, or the whole reply when it has none) and hands
//! it to the OS clipboard through `arboard`.

use crate::markdown::extract_code_blocks;
use crate::models::{Message, MessageRole};

/// What a copy request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// The last code block of the latest reply
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// The full text of the latest reply
    Reply(String),
}

impl CopyTarget {
    pub fn text(&self) -> &str {
        match self {
            CopyTarget::CodeBlock { code, .. } => code,
            CopyTarget::Reply(text) => text,
        }
    }

    /// Short confirmation shown after copying.
    pub fn describe(&self) -> String {
        match self {
            CopyTarget::CodeBlock {
                language: Some(language),
                ..
            } => format!("Copied {} code block", language),
            CopyTarget::CodeBlock { language: None, .. } => "Copied code block".to_string(),
            CopyTarget::Reply(_) => "Copied reply".to_string(),
        }
    }
}

/// Errors that can occur when copying.
#[derive(Debug)]
pub enum ClipboardError {
    /// Nothing to copy yet.
    NothingToCopy,
    /// Clipboard access failed.
    Unavailable(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::NothingToCopy => write!(f, "Nothing to copy yet"),
            ClipboardError::Unavailable(e) => write!(f, "Clipboard unavailable: {}", e),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Resolve what a copy request should put on the clipboard.
pub fn copy_target(messages: &[Message]) -> Option<CopyTarget> {
    let reply = messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::Assistant && !m.content.trim().is_empty())?;

    match extract_code_blocks(&reply.content).pop() {
        Some(block) => Some(CopyTarget::CodeBlock {
            language: block.language,
            code: block.code,
        }),
        None => Some(CopyTarget::Reply(reply.content.clone())),
    }
}

/// Put `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

/// Copy the latest reply (or its last code block).
///
/// Returns what was copied.
pub fn copy_latest(messages: &[Message]) -> Result<CopyTarget, ClipboardError> {
    let target = copy_target(messages).ok_or(ClipboardError::NothingToCopy)?;
    copy_text(target.text())?;
    Ok(target)
}
