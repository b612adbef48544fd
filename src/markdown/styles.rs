//! Style constants for markdown rendering

use ratatui::style::{Color, Modifier, Style};

/// Body of fenced code blocks
pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::Gray);

/// Gutter and frame drawn around code blocks
pub const STYLE_CODE_FRAME: Style = Style::new().fg(Color::DarkGray);

/// Language label on top of a code block
pub const STYLE_CODE_LABEL: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Inline code - cyan color
pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Headings - cyan and bold
pub const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Links - blue and underlined
pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

/// Link target shown after the link text
pub const STYLE_LINK_URL: Style = Style::new().fg(Color::DarkGray);

/// Block quote bar
pub const STYLE_QUOTE: Style = Style::new().fg(Color::DarkGray);

/// List bullets and numbers
pub const STYLE_BULLET: Style = Style::new().fg(Color::Cyan);

/// Table borders
pub const STYLE_TABLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// Table header cells
pub const STYLE_TABLE_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
