//! Memoization cache for markdown rendering
//!
//! Caches rendered lines keyed by a hash of the message content. Messages
//! never change once received, so every message is parsed once instead of
//! on every frame.

use ratatui::text::Line;
use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::markdown::{render_markdown, MARKDOWN_CACHE_MAX_ENTRIES};

/// Memoization cache for markdown rendering.
pub struct MarkdownCache {
    entries: HashMap<u64, Vec<Line<'static>>>,
    /// Insertion order for eviction (oldest first)
    insertion_order: VecDeque<u64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for MarkdownCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownCache {
    pub fn new() -> Self {
        Self::with_capacity(MARKDOWN_CACHE_MAX_ENTRIES)
    }

    /// Cache holding at most `capacity` rendered messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    fn hash_content(content: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        hasher.finish()
    }

    /// Render markdown, reusing a previous result for identical content.
    pub fn render(&mut self, content: &str) -> Vec<Line<'static>> {
        let hash = Self::hash_content(content);

        if let Some(lines) = self.entries.get(&hash) {
            self.hits += 1;
            return lines.clone();
        }

        self.misses += 1;
        let lines = render_markdown(content);

        while self.entries.len() >= self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.entries.insert(hash, lines.clone());
        self.insertion_order.push_back(hash);
        lines
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
