//! Sidebar: "New chat" and the saved thread list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::helpers::truncate_to_width;
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_SELECTED_BG,
};
use crate::app::{App, Focus};

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let border_color = if focused {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = sidebar_lines(app, inner.width as usize);

    // Keep the selected row visible
    let selected_row = if app.sidebar_index == 0 {
        0
    } else {
        app.sidebar_index + 2
    };
    let scroll = selected_row.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;

    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn sidebar_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let focused = app.focus == Focus::Sidebar;
    let active_id = app.session.active_thread_id();
    let mut lines = Vec::new();

    lines.push(row(
        "+ New chat".to_string(),
        Style::default().fg(COLOR_ACCENT),
        focused && app.sidebar_index == 0,
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Your chats",
        Style::default().fg(COLOR_DIM).add_modifier(Modifier::BOLD),
    )));

    if app.session.threads().is_empty() {
        lines.push(Line::from(Span::styled(
            "No saved chats",
            Style::default().fg(COLOR_DIM),
        )));
    }

    for (i, thread) in app.session.threads().iter().enumerate() {
        let active = thread.thread_id == active_id;
        let marker = if active { "▸ " } else { "  " };
        let mut style = Style::default().fg(COLOR_ACCENT);
        if active {
            style = style.add_modifier(Modifier::BOLD);
        }
        let title = truncate_to_width(&thread.title, width.saturating_sub(2));
        lines.push(row(
            format!("{}{}", marker, title),
            style,
            focused && app.sidebar_index == i + 1,
        ));
    }

    lines
}

fn row(text: String, style: Style, selected: bool) -> Line<'static> {
    let style = if selected {
        style.bg(COLOR_SELECTED_BG)
    } else {
        style
    };
    Line::from(Span::styled(text, style))
}
