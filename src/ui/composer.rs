//! Composer pane: input box, placeholder and disclaimer.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM};
use crate::app::{App, Focus};

pub const PLACEHOLDER: &str = "Ask anything";
pub const DISCLAIMER: &str = "UniRAG can make mistakes. Consider checking important information.";

/// Rows the composer block needs at `width`, borders included.
pub fn composer_height(app: &App, width: u16) -> u16 {
    app.composer.visible_rows(width.saturating_sub(2)) + 2
}

pub fn render_composer(frame: &mut Frame, area: Rect, app: &App) {
    let disabled = app.composer_disabled();
    let focused = app.focus == Focus::Composer && app.delete_dialog.is_none();
    let border_color = if focused && !disabled {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    if disabled {
        block = block.title(Span::styled(" waiting for reply ", Style::default().fg(COLOR_DIM)));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.composer.is_empty() {
        let placeholder = Span::styled(
            PLACEHOLDER,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(Paragraph::new(Line::from(placeholder)), inner);
        if focused && !disabled {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let layout = app.composer.layout(inner.width);
    let scroll = layout.scroll_for(inner.height);
    let text_style = if disabled {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    let lines: Vec<Line> = layout
        .rows
        .iter()
        .map(|r| Line::from(Span::styled(r.as_str(), text_style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    if focused && !disabled {
        let (row, col) = layout.cursor;
        let y = inner.y + row.saturating_sub(scroll);
        let x = inner.x + col.min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, y));
    }
}

pub fn render_disclaimer(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(DISCLAIMER, Style::default().fg(COLOR_DIM)));
    frame.render_widget(
        Paragraph::new(line).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}
