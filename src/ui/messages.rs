//! Conversation area: messages, welcome placeholder and loading indicator.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::SPINNER_FRAMES;
use super::text_wrapping::{wrap_line_with_prefix, wrap_lines_with_prefix};
use super::theme::{COLOR_ACCENT, COLOR_ASSISTANT, COLOR_DIM, COLOR_USER};
use crate::app::App;
use crate::markdown::MarkdownCache;
use crate::models::{Message, MessageRole};

pub const WELCOME_TEXT: &str = "How can I help you?";

/// Indent of message bodies under their role marker.
const BODY_INDENT: &str = "  ";

/// Marker line shown above each message.
fn role_marker(role: &MessageRole) -> Line<'static> {
    let (label, color) = match role {
        MessageRole::User => ("You".to_string(), COLOR_USER),
        MessageRole::Assistant => ("UniRAG".to_string(), COLOR_ASSISTANT),
        MessageRole::Other(label) => (label.clone(), COLOR_DIM),
    };
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Screen rows for one message, wrapped to `width` columns.
///
/// Every body, the user's included, is rendered as markdown.
pub fn message_lines(
    message: &Message,
    cache: &mut MarkdownCache,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = wrap_line_with_prefix(role_marker(&message.role), "", width);
    lines.extend(wrap_lines_with_prefix(
        cache.render(&message.content),
        BODY_INDENT,
        width,
    ));
    lines
}

/// Spinner line shown while a request is outstanding.
pub fn loading_line(frame_index: usize, sending: bool) -> Line<'static> {
    let spinner = SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()];
    let label = if sending { "Thinking..." } else { "Loading..." };
    Line::from(vec![
        Span::styled(format!("{} ", spinner), Style::default().fg(COLOR_ASSISTANT)),
        Span::styled(label, Style::default().fg(COLOR_DIM)),
    ])
}

pub fn render_messages(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.session.is_welcome_visible() {
        app.max_message_scroll = 0;
        render_welcome(frame, area);
        return;
    }

    let width = area.width as usize;
    let mut rows: Vec<Line<'static>> = Vec::new();
    for message in app.session.messages() {
        rows.extend(message_lines(message, &mut app.markdown_cache, width));
        rows.push(Line::from(""));
    }
    if app.session.is_loading() {
        let spinner = loading_line(app.animation_frame(), app.session.is_sending());
        rows.extend(wrap_line_with_prefix(spinner, "", width));
    }

    // Scroll is an offset from the bottom so new content stays in view.
    // Only the visible slice is handed to the widget.
    let height = area.height as usize;
    let max_scroll = rows.len().saturating_sub(height).min(u16::MAX as usize) as u16;
    app.max_message_scroll = max_scroll;
    app.message_scroll = app.message_scroll.min(max_scroll);

    let end = rows.len() - app.message_scroll as usize;
    let start = end.saturating_sub(height);
    let visible: Vec<Line<'static>> = rows.drain(start..end).collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let top = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        WELCOME_TEXT,
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
