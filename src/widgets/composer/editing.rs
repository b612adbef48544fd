//! Text editing and cursor movement for the composer.

use super::Composer;

impl Composer {
    /// Insert a character at the cursor. `\n` splits the line.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        if c == '\r' {
            return;
        }
        let idx = self.byte_index(self.row, self.col);
        self.lines[self.row].insert(idx, c);
        self.col += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let idx = self.byte_index(self.row, self.col);
        let rest = self.lines[self.row].split_off(idx);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Insert a run of text, as from a paste. CRLF line endings are folded.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n");
        for c in normalized.chars() {
            self.insert_char(c);
        }
    }

    /// Bracketed paste entry point.
    pub fn paste(&mut self, text: &str) {
        self.insert_str(text);
    }

    /// Delete the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let idx = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(idx);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_line_chars();
            self.lines[self.row].push_str(&line);
        }
    }

    /// Delete the char under the cursor, joining with the next line at end of line.
    pub fn delete(&mut self) {
        if self.col < self.current_line_chars() {
            let idx = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(idx);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_line_chars();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_line_chars() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_line_chars();
    }

    /// Move up one logical line. Returns false when already on the first line.
    pub fn move_up(&mut self) -> bool {
        if self.row == 0 {
            return false;
        }
        self.row -= 1;
        self.col = self.col.min(self.current_line_chars());
        true
    }

    /// Move down one logical line. Returns false when already on the last line.
    pub fn move_down(&mut self) -> bool {
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        self.row += 1;
        self.col = self.col.min(self.current_line_chars());
        true
    }

    /// Delete back to the previous word boundary (Ctrl+W).
    pub fn delete_word_backward(&mut self) {
        if self.col == 0 {
            self.backspace();
            return;
        }
        let chars: Vec<char> = self.current_line().chars().collect();
        let mut start = self.col;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let from = self.byte_index(self.row, start);
        let to = self.byte_index(self.row, self.col);
        self.lines[self.row].replace_range(from..to, "");
        self.col = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer_with(text: &str) -> Composer {
        let mut composer = Composer::new();
        composer.set_text(text);
        composer
    }

    #[test]
    fn test_insert_multibyte_chars() {
        let mut composer = Composer::new();
        for c in "héllo 日本".chars() {
            composer.insert_char(c);
        }
        composer.move_left();
        composer.move_left();
        composer.insert_char('→');
        assert_eq!(composer.text(), "héllo →日本");
        composer.backspace();
        composer.backspace();
        assert_eq!(composer.text(), "héllo日本");
    }

    #[test]
    fn test_newline_splits_line() {
        let mut composer = composer_with("abcd");
        composer.move_left();
        composer.move_left();
        composer.insert_newline();
        assert_eq!(composer.text(), "ab\ncd");
        assert_eq!(composer.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut composer = composer_with("ab\ncd");
        composer.move_home();
        composer.backspace();
        assert_eq!(composer.text(), "abcd");
        assert_eq!(composer.cursor(), (0, 2));
    }

    #[test]
    fn test_delete_at_end_joins_next() {
        let mut composer = composer_with("ab\ncd");
        assert!(composer.move_up());
        composer.move_end();
        composer.delete();
        assert_eq!(composer.text(), "abcd");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut composer = Composer::new();
        composer.backspace();
        composer.delete();
        assert!(composer.is_empty());
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut composer = composer_with("a\nlonger line");
        assert_eq!(composer.cursor(), (1, 11));
        assert!(composer.move_up());
        assert_eq!(composer.cursor(), (0, 1));
        assert!(!composer.move_up());
        assert!(composer.move_down());
        assert!(!composer.move_down());
    }

    #[test]
    fn test_left_right_cross_lines() {
        let mut composer = composer_with("ab\nc");
        composer.move_home();
        composer.move_left();
        assert_eq!(composer.cursor(), (0, 2));
        composer.move_right();
        assert_eq!(composer.cursor(), (1, 0));
    }

    #[test]
    fn test_paste_normalizes_crlf() {
        let mut composer = Composer::new();
        composer.paste("one\r\ntwo\r\nthree");
        assert_eq!(composer.text(), "one\ntwo\nthree");
        assert_eq!(composer.line_count(), 3);
    }

    #[test]
    fn test_delete_word_backward() {
        let mut composer = composer_with("hello big world  ");
        composer.delete_word_backward();
        assert_eq!(composer.text(), "hello big ");
        composer.delete_word_backward();
        assert_eq!(composer.text(), "hello ");
    }
}
