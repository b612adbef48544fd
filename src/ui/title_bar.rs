//! Title bar with the backend connection indicator.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_CONNECTED, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_PENDING};
use crate::app::App;

/// Indicator text and color for the last health probe result.
pub fn connection_status(healthy: Option<bool>) -> (&'static str, ratatui::style::Color) {
    match healthy {
        Some(true) => ("● Connected", COLOR_CONNECTED),
        Some(false) => ("● Disconnected", COLOR_ERROR),
        None => ("○ Connecting", COLOR_PENDING),
    }
}

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (status, status_color) = connection_status(app.session.backend_healthy());
    let title = " UniRAG";
    let url = format!("{}  ", app.api_url);

    let used = title.width() + status.width() + url.width() + 2;
    let pad = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(
            title,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(url, Style::default().fg(COLOR_DIM)),
        Span::styled(status, Style::default().fg(status_color)),
        Span::raw("  "),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
