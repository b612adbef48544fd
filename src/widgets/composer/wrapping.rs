//! Visual wrapping of composer text to a fixed width.

use unicode_width::UnicodeWidthChar;

use super::{Composer, COMPOSER_MAX_ROWS};

/// Composer text broken into display rows, plus the cursor's display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerLayout {
    pub rows: Vec<String>,
    /// Cursor as (display row, display column)
    pub cursor: (u16, u16),
}

impl ComposerLayout {
    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// First row to show so the cursor stays visible in `visible` rows.
    pub fn scroll_for(&self, visible: u16) -> u16 {
        if visible == 0 {
            return 0;
        }
        self.cursor.0.saturating_sub(visible - 1)
    }
}

impl Composer {
    /// Wrap the text to `width` columns and locate the cursor.
    ///
    /// Wide characters never straddle a row boundary. A cursor sitting
    /// exactly at the right edge moves to the start of the next row.
    pub fn layout(&self, width: u16) -> ComposerLayout {
        let width = width.max(1) as usize;
        let mut rows = Vec::new();
        let mut cursor = (0u16, 0u16);

        for (line_idx, line) in self.lines.iter().enumerate() {
            let mut row = String::new();
            let mut row_width = 0usize;

            for (char_idx, ch) in line.chars().enumerate() {
                let ch_width = ch.width().unwrap_or(0);
                if row_width + ch_width > width && row_width > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                if line_idx == self.row && char_idx == self.col {
                    cursor = (rows.len() as u16, row_width as u16);
                }
                row.push(ch);
                row_width += ch_width;
            }

            if line_idx == self.row && self.col >= line.chars().count() {
                if row_width >= width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                cursor = (rows.len() as u16, row_width as u16);
            }
            rows.push(row);
        }

        ComposerLayout { rows, cursor }
    }

    /// Rows needed to show the text at `width`, capped at [`COMPOSER_MAX_ROWS`].
    pub fn visible_rows(&self, width: u16) -> u16 {
        self.layout(width).height().clamp(1, COMPOSER_MAX_ROWS)
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
    fn test_short_text_single_row() {
        let layout = composer_with("hi").layout(10);
        assert_eq!(layout.rows, vec!["hi".to_string()]);
        assert_eq!(layout.cursor, (0, 2));
    }

    #[test]
    fn test_wraps_long_line() {
        let layout = composer_with("abcdefgh").layout(3);
        assert_eq!(layout.rows, vec!["abc", "def", "gh"]);
        assert_eq!(layout.cursor, (2, 2));
    }

    #[test]
    fn test_cursor_at_exact_edge_moves_down() {
        let layout = composer_with("abc").layout(3);
        assert_eq!(layout.rows, vec!["abc", ""]);
        assert_eq!(layout.cursor, (1, 0));
    }

    #[test]
    fn test_wide_chars_do_not_straddle() {
        let layout = composer_with("a日本").layout(4);
        assert_eq!(layout.rows, vec!["a日", "本"]);
        assert_eq!(layout.cursor, (1, 2));
    }

    #[test]
    fn test_cursor_mid_text() {
        let mut composer = composer_with("abcdef\nxy");
        composer.move_up();
        composer.move_home();
        composer.move_right();
        composer.move_right();
        composer.move_right();
        composer.move_right();
        let layout = composer.layout(3);
        assert_eq!(layout.rows, vec!["abc", "def", "xy"]);
        assert_eq!(layout.cursor, (1, 1));
    }

    #[test]
    fn test_visible_rows_capped() {
        let composer = composer_with(&"x\n".repeat(20));
        assert_eq!(composer.visible_rows(10), COMPOSER_MAX_ROWS);
        assert_eq!(Composer::new().visible_rows(10), 1);
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let layout = composer_with(&"x\n".repeat(10)).layout(10);
        assert_eq!(layout.cursor.0, 10);
        assert_eq!(layout.scroll_for(4), 7);
        assert_eq!(layout.scroll_for(20), 0);
    }
}
