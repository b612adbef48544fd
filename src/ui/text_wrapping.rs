//! Word wrapping of styled lines for the conversation view.
//!
//! The message list is wrapped here rather than by `Paragraph`, so the
//! number of rows is known exactly and scrolling can slice the tail.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rows being assembled for one logical line.
struct RowBuilder {
    prefix: &'static str,
    line_style: Style,
    content_width: usize,
    rows: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    pending: String,
    pending_style: Style,
    width: usize,
}

impl RowBuilder {
    fn new(prefix: &'static str, line_style: Style, content_width: usize) -> Self {
        Self {
            prefix,
            line_style,
            content_width,
            rows: Vec::new(),
            spans: Vec::new(),
            pending: String::new(),
            pending_style: Style::default(),
            width: 0,
        }
    }

    fn push_str(&mut self, text: &str, style: Style) {
        if self.pending_style != style && !self.pending.is_empty() {
            self.flush_pending();
        }
        self.pending_style = style;
        self.pending.push_str(text);
        self.width += text.width();
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.spans.push(Span::styled(text, self.pending_style));
        }
    }

    fn break_row(&mut self) {
        self.flush_pending();
        let mut spans = vec![Span::raw(self.prefix)];
        spans.append(&mut self.spans);
        self.rows.push(Line::from(spans).style(self.line_style));
        self.width = 0;
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let word_width = word.width();
        if self.width + word_width <= self.content_width {
            self.push_str(word, style);
            return;
        }
        if self.width > 0 {
            self.break_row();
        }
        if word_width <= self.content_width {
            self.push_str(word, style);
            return;
        }
        // Longer than a whole row: split at character boundaries
        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if self.width > 0 && self.width + ch_width > self.content_width {
                self.break_row();
            }
            self.push_str(ch.encode_utf8(&mut buf), style);
        }
    }

    fn push_space(&mut self, style: Style) {
        // A space that would overflow becomes the row break and is dropped
        if self.width < self.content_width {
            self.push_str(" ", style);
        } else {
            self.break_row();
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if self.width > 0 || !self.pending.is_empty() || !self.spans.is_empty() || self.rows.is_empty() {
            self.break_row();
        }
        self.rows
    }
}

/// Wrap `line` to rows at most `max_width` columns wide, word by word.
///
/// Every row starts with `prefix`. Words wider than a row are split. The
/// line's own style carries over to every row.
pub fn wrap_line_with_prefix(
    line: Line<'static>,
    prefix: &'static str,
    max_width: usize,
) -> Vec<Line<'static>> {
    let content_width = max_width.saturating_sub(prefix.width());
    if content_width == 0 {
        let mut spans = vec![Span::raw(prefix)];
        spans.extend(line.spans);
        return vec![Line::from(spans).style(line.style)];
    }

    let mut builder = RowBuilder::new(prefix, line.style, content_width);
    for span in line.spans {
        let style = span.style;
        let mut word = String::new();
        for ch in span.content.chars() {
            match ch {
                ' ' | '\t' => {
                    if !word.is_empty() {
                        builder.push_word(&word, style);
                        word.clear();
                    }
                    let count = if ch == '\t' { 4 } else { 1 };
                    for _ in 0..count {
                        builder.push_space(style);
                    }
                }
                _ => word.push(ch),
            }
        }
        if !word.is_empty() {
            builder.push_word(&word, style);
        }
    }
    builder.finish()
}

pub fn wrap_lines_with_prefix(
    lines: Vec<Line<'static>>,
    prefix: &'static str,
    max_width: usize,
) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line_with_prefix(line, prefix, max_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn rows_text(rows: &[Line]) -> Vec<String> {
        rows.iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_short_line_single_row() {
        let rows = wrap_line_with_prefix(Line::from("hello world"), "  ", 40);
        assert_eq!(rows_text(&rows), vec!["  hello world"]);
    }

    #[test]
    fn test_empty_line_keeps_one_row() {
        let rows = wrap_line_with_prefix(Line::from(""), "  ", 40);
        assert_eq!(rows_text(&rows), vec!["  "]);
    }

    #[test]
    fn test_wraps_on_word_boundary() {
        let rows = wrap_line_with_prefix(Line::from("alpha beta gamma delta"), "", 11);
        assert_eq!(rows_text(&rows), vec!["alpha beta ", "gamma delta"]);
    }

    #[test]
    fn test_word_wrap_needs_more_rows_than_char_count() {
        // 27 columns would fit 3 rows of 10 if split anywhere; whole words need 4
        let rows = wrap_line_with_prefix(Line::from("aaaaaa bbbbbb cccccc dddddd"), "", 10);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.width() <= 10));
    }

    #[test]
    fn test_long_word_split() {
        let rows = wrap_line_with_prefix(Line::from("x".repeat(25)), "> ", 12);
        assert_eq!(
            rows_text(&rows),
            vec!["> xxxxxxxxxx", "> xxxxxxxxxx", "> xxxxx"]
        );
    }

    #[test]
    fn test_wide_chars_never_overflow() {
        let rows = wrap_line_with_prefix(Line::from("日本語日本語日本"), "", 5);
        assert!(rows.iter().all(|r| r.width() <= 5));
        assert_eq!(rows_text(&rows).concat(), "日本語日本語日本");
    }

    #[test]
    fn test_styles_and_line_style_preserved() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::raw("plain "), Span::styled("bold words here", bold)])
            .style(Style::default().bg(Color::Black));
        let rows = wrap_line_with_prefix(line, "", 12);

        assert!(rows.len() > 1);
        assert!(rows.iter().all(|r| r.style.bg == Some(Color::Black)));
        let bold_text: String = rows
            .iter()
            .flat_map(|r| r.spans.iter())
            .filter(|s| s.style == bold)
            .map(|s| s.content.as_ref())
            .collect();
        assert!(bold_text.contains("bold"));
        assert!(bold_text.contains("here"));
    }

    #[test]
    fn test_indentation_kept() {
        let rows = wrap_line_with_prefix(Line::from("    let x = 1;"), "", 40);
        assert_eq!(rows_text(&rows), vec!["    let x = 1;"]);
    }

    #[test]
    fn test_zero_width_returns_line_unwrapped() {
        let rows = wrap_line_with_prefix(Line::from("anything"), "  ", 2);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_wrap_lines_flattens() {
        let rows = wrap_lines_with_prefix(
            vec![Line::from("one two"), Line::from(""), Line::from("three")],
            "",
            4,
        );
        assert_eq!(rows_text(&rows), vec!["one ", "two", "", "thre", "e"]);
    }
}
