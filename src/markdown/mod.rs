//! Markdown rendering for the terminal
//!
//! Converts assistant replies to styled ratatui Lines: headings, emphasis,
//! inline code, lists, block quotes, links, tables and fenced code blocks
//! with a language label. Lines are not wrapped here; the message view
//! wraps them to the available width.
//!
//! `MarkdownCache` memoizes rendered output keyed by content hash.

mod cache;
mod styles;

pub use cache::MarkdownCache;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use styles::{
    STYLE_BULLET, STYLE_CODE_BLOCK, STYLE_CODE_FRAME, STYLE_CODE_LABEL, STYLE_HEADING,
    STYLE_INLINE_CODE, STYLE_LINK, STYLE_LINK_URL, STYLE_QUOTE, STYLE_TABLE_BORDER,
    STYLE_TABLE_HEADER,
};

/// Maximum number of entries in the markdown cache before eviction
pub const MARKDOWN_CACHE_MAX_ENTRIES: usize = 500;

/// A fenced or indented code block found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First word of the fence info string, if any
    pub language: Option<String>,
    /// Block content with its trailing newline removed
    pub code: String,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// Collect every code block in `text`, in order.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<CodeBlock> = None;

    for event in Parser::new_ext(text, parser_options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                current = Some(CodeBlock {
                    language: fence_language(&kind),
                    code: String::new(),
                });
            }
            Event::Text(content) => {
                if let Some(block) = current.as_mut() {
                    block.code.push_str(&content);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(mut block) = current.take() {
                    if block.code.ends_with('\n') {
                        block.code.pop();
                    }
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Render markdown text to a vector of styled Lines.
///
/// Always returns at least one line. Incomplete markdown (an unclosed
/// fence, say) renders as far as it parses.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(text, parser_options()) {
        renderer.handle(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    /// Nested inline styles; empty means default
    styles: Vec<Style>,
    /// One entry per open list: next number for ordered lists
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    link_url: Option<String>,
    link_text: String,
    in_table: bool,
    table_rows: Vec<Vec<String>>,
    table_row: Vec<String>,
    table_cell: String,
}

impl Renderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.styles.push(next);
    }

    /// Start-of-line decoration for block quotes.
    fn push_span(&mut self, span: Span<'static>) {
        if self.spans.is_empty() && self.quote_depth > 0 {
            self.spans
                .push(Span::styled("│ ".repeat(self.quote_depth), STYLE_QUOTE));
        }
        self.spans.push(span);
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    /// Separate blocks by one blank line, never more.
    fn blank_line(&mut self) {
        self.flush();
        let last_blank = self.lines.last().map_or(true, |l| l.width() == 0);
        if !last_blank {
            self.lines.push(Line::default());
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if self.in_table {
                    self.table_cell.push_str(&code);
                } else {
                    if self.link_url.is_some() {
                        self.link_text.push_str(&code);
                    }
                    self.push_span(Span::styled(code.to_string(), STYLE_INLINE_CODE));
                }
            }
            Event::SoftBreak => {
                if self.in_table {
                    self.table_cell.push(' ');
                } else {
                    self.push_span(Span::styled(" ".to_string(), self.style()));
                }
            }
            Event::HardBreak => {
                if self.in_table {
                    self.table_cell.push(' ');
                } else {
                    self.flush();
                }
            }
            Event::Rule => {
                self.blank_line();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(24), STYLE_CODE_FRAME)));
                self.lines.push(Line::default());
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.push_span(Span::styled(marker.to_string(), STYLE_BULLET));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside list items stay on the bullet line
                if self.lists.is_empty() {
                    self.flush();
                }
            }
            Tag::Heading { level, .. } => {
                self.blank_line();
                self.push_style(|_| STYLE_HEADING);
                let marks = "#".repeat(level as usize);
                self.push_span(Span::styled(format!("{} ", marks), STYLE_HEADING));
            }
            Tag::CodeBlock(kind) => {
                self.blank_line();
                self.in_code_block = true;
                let label = fence_language(&kind).unwrap_or_else(|| "code".to_string());
                self.lines.push(Line::from(vec![
                    Span::styled("┌─ ".to_string(), STYLE_CODE_FRAME),
                    Span::styled(label, STYLE_CODE_LABEL),
                ]));
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.flush();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.push_span(Span::styled(
                    format!("{}{}", "  ".repeat(depth), marker),
                    STYLE_BULLET,
                ));
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.link_text.clear();
                self.push_style(|s| s.patch(STYLE_LINK));
            }
            Tag::Table(_) => {
                self.blank_line();
                self.in_table = true;
                self.table_rows.clear();
            }
            Tag::TableHead | Tag::TableRow => self.table_row.clear(),
            Tag::TableCell => self.table_cell.clear(),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.flush();
                }
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.lines
                    .push(Line::from(Span::styled("└─".to_string(), STYLE_CODE_FRAME)));
                self.lines.push(Line::default());
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.styles.pop();
                if self.quote_depth == 0 {
                    self.blank_line();
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link_url.take() {
                    if url != self.link_text {
                        self.push_span(Span::styled(format!(" ({})", url), STYLE_LINK_URL));
                    }
                }
                self.link_text.clear();
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                self.table_rows.push(std::mem::take(&mut self.table_row));
            }
            TagEnd::TableCell => {
                self.table_row.push(std::mem::take(&mut self.table_cell));
            }
            TagEnd::Table => {
                render_table_to_lines(&self.table_rows, &mut self.lines);
                self.in_table = false;
                self.table_rows.clear();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_table {
            self.table_cell.push_str(text);
            return;
        }
        if self.link_url.is_some() {
            self.link_text.push_str(text);
        }

        if self.in_code_block {
            // Every source line becomes its own Line behind the gutter
            let body = text.strip_suffix('\n').unwrap_or(text);
            for line in body.split('\n') {
                self.lines.push(Line::from(vec![
                    Span::styled("│ ".to_string(), STYLE_CODE_FRAME),
                    Span::styled(line.to_string(), STYLE_CODE_BLOCK),
                ]));
            }
            return;
        }

        let style = self.style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if !part.is_empty() {
                self.push_span(Span::styled(part.to_string(), style));
            }
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

/// Render collected table rows with box-drawing borders. The first row is
/// the header.
fn render_table_to_lines(table_rows: &[Vec<String>], lines: &mut Vec<Line<'static>>) {
    let num_cols = table_rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if num_cols == 0 {
        return;
    }

    let mut col_widths = vec![3usize; num_cols];
    for row in table_rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.trim().width());
        }
    }

    lines.push(Line::from(Span::styled(
        build_table_border(&col_widths, '┌', '┬', '┐'),
        STYLE_TABLE_BORDER,
    )));

    for (row_idx, row) in table_rows.iter().enumerate() {
        let style = if row_idx == 0 {
            STYLE_TABLE_HEADER
        } else {
            Style::default()
        };
        let mut spans: Vec<Span<'static>> = vec![Span::styled("│".to_string(), STYLE_TABLE_BORDER)];
        for (col_idx, width) in col_widths.iter().enumerate() {
            let content = row.get(col_idx).map(|c| c.trim()).unwrap_or("");
            let pad = width.saturating_sub(content.width());
            spans.push(Span::styled(
                format!(" {}{} ", content, " ".repeat(pad)),
                style,
            ));
            spans.push(Span::styled("│".to_string(), STYLE_TABLE_BORDER));
        }
        lines.push(Line::from(spans));

        if row_idx == 0 && table_rows.len() > 1 {
            lines.push(Line::from(Span::styled(
                build_table_border(&col_widths, '├', '┼', '┤'),
                STYLE_TABLE_BORDER,
            )));
        }
    }

    lines.push(Line::from(Span::styled(
        build_table_border(&col_widths, '└', '┴', '┘'),
        STYLE_TABLE_BORDER,
    )));
    lines.push(Line::default());
}

fn build_table_border(col_widths: &[usize], left: char, middle: char, right: char) -> String {
    let inner: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, inner.join(&middle.to_string()), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn all_text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(line_text).collect()
    }

    #[test]
    fn test_plain_text() {
        let lines = render_markdown("Hello, world!");
        assert_eq!(all_text(&lines), vec!["Hello, world!"]);
    }

    #[test]
    fn test_empty_input() {
        let lines = render_markdown("");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width(), 0);
    }

    #[test]
    fn test_bold_and_italic() {
        let lines = render_markdown("This is **bold** and *italic*");
        let bold = lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = lines[0].spans.iter().find(|s| s.content == "italic").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_inline_code() {
        let lines = render_markdown("Use `cargo run` to start");
        let code = lines[0].spans.iter().find(|s| s.content == "cargo run").unwrap();
        assert_eq!(code.style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_paragraphs_separated_by_one_blank_line() {
        let lines = render_markdown("First\n\nSecond");
        assert_eq!(all_text(&lines), vec!["First", "", "Second"]);
    }

    #[test]
    fn test_heading() {
        let lines = render_markdown("## Title\nBody");
        assert_eq!(line_text(&lines[0]), "## Title");
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line_text(lines.last().unwrap()), "Body");
    }

    #[test]
    fn test_code_block_has_label_and_gutter() {
        let md = "```python\nprint('hi')\nx = 1\n```";
        let text = all_text(&render_markdown(md));
        assert_eq!(text, vec!["┌─ python", "│ print('hi')", "│ x = 1", "└─"]);
    }

    #[test]
    fn test_code_block_without_language() {
        let text = all_text(&render_markdown("```\nls -la\n```"));
        assert_eq!(text[0], "┌─ code");
    }

    #[test]
    fn test_unordered_and_ordered_lists() {
        let text = all_text(&render_markdown("- a\n- b\n\n1. one\n2. two"));
        assert!(text.contains(&"• a".to_string()));
        assert!(text.contains(&"• b".to_string()));
        assert!(text.contains(&"1. one".to_string()));
        assert!(text.contains(&"2. two".to_string()));
    }

    #[test]
    fn test_nested_list_indents() {
        let text = all_text(&render_markdown("- outer\n  - inner"));
        assert!(text.contains(&"  • inner".to_string()));
    }

    #[test]
    fn test_link_shows_url() {
        let lines = render_markdown("See [docs](https://example.com).");
        assert_eq!(line_text(&lines[0]), "See docs (https://example.com).");
        let link = lines[0].spans.iter().find(|s| s.content == "docs").unwrap();
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_autolink_not_duplicated() {
        let lines = render_markdown("<https://example.com>");
        assert_eq!(line_text(&lines[0]), "https://example.com");
    }

    #[test]
    fn test_block_quote_prefix() {
        let text = all_text(&render_markdown("> quoted"));
        assert_eq!(text, vec!["│ quoted"]);
    }

    #[test]
    fn test_table() {
        let md = "| Name | Qty |\n|------|-----|\n| Apple | 3 |";
        let text = all_text(&render_markdown(md));
        assert!(text[0].starts_with('┌'));
        assert!(text[1].contains("Name"));
        assert!(text[2].starts_with('├'));
        assert!(text[3].contains("Apple"));
        assert!(text[4].starts_with('└'));
    }

    #[test]
    fn test_unclosed_fence_does_not_panic() {
        let lines = render_markdown("```rust\nfn main() {");
        assert!(all_text(&lines).iter().any(|l| l.contains("fn main")));
    }

    #[test]
    fn test_extract_code_blocks() {
        let md = "Intro\n```rust\nfn a() {}\n```\ntext\n```\nplain\n```";
        let blocks = extract_code_blocks(md);
        assert_eq!(
            blocks,
            vec![
                CodeBlock {
                    language: Some("rust".to_string()),
                    code: "fn a() {}".to_string()
                },
                CodeBlock {
                    language: None,
                    code: "plain".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_extract_code_blocks_none() {
        assert!(extract_code_blocks("no code here").is_empty());
    }
}
