//! Multiline message composer.
//!
//! Text is kept as logical lines with a (row, col) cursor measured in
//! chars, so every edit stays on a char boundary regardless of how many
//! bytes a character takes. Visual wrapping for display lives in
//! [`wrapping`].

mod editing;
mod wrapping;

pub use wrapping::ComposerLayout;

/// Rows the composer grows to before it starts scrolling.
pub const COMPOSER_MAX_ROWS: u16 = 8;

/// Editable multiline text buffer backing the input area.
#[derive(Debug, Clone)]
pub struct Composer {
    /// Logical lines; never empty
    pub(super) lines: Vec<String>,
    /// Cursor row (index into `lines`)
    pub(super) row: usize,
    /// Cursor column in chars
    pub(super) col: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    /// Full text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when there is nothing to send (whitespace only counts as empty).
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Cursor as (row, char column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Take the text out, leaving the composer empty.
    pub fn take_text(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
    }

    /// Replace the content, placing the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert_str(text);
    }

    pub(super) fn current_line(&self) -> &str {
        &self.lines[self.row]
    }

    pub(super) fn current_line_chars(&self) -> usize {
        self.current_line().chars().count()
    }

    /// Byte offset of char column `col` in line `row`.
    pub(super) fn byte_index(&self, row: usize, col: usize) -> usize {
        let line = &self.lines[row];
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }
}
