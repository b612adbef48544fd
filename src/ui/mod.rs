//! UI rendering for the UniRAG chat client
//!
//! Layout, top to bottom:
//! - Title bar with the backend connection indicator
//! - Sidebar ("New chat", "Your chats") beside the conversation
//! - Notice line, composer and disclaimer under the conversation
//!
//! The delete confirmation dialog is drawn over everything else.

mod composer;
mod dialog;
mod helpers;
mod messages;
mod sidebar;
mod text_wrapping;
mod theme;
mod title_bar;

pub use composer::{DISCLAIMER, PLACEHOLDER};
pub use dialog::{DELETE_BODY, DELETE_TITLE};
pub use helpers::truncate_to_width;
pub use messages::{message_lines, WELCOME_TEXT};
pub use title_bar::connection_status;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use composer::{composer_height, render_composer, render_disclaimer};
use dialog::render_delete_dialog;
use messages::render_messages;
use sidebar::render_sidebar;
use theme::{COLOR_DIM, COLOR_ERROR};
use title_bar::render_title_bar;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 30;

/// Below this width the sidebar is hidden.
const SIDEBAR_MIN_TERMINAL_WIDTH: u16 = 70;

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_title_bar(frame, rows[0], app);

    let main = if area.width >= SIDEBAR_MIN_TERMINAL_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[1]);
        render_sidebar(frame, cols[0], app);
        cols[1]
    } else {
        rows[1]
    };

    render_conversation(frame, main, app);

    if let Some(dialog) = &app.delete_dialog {
        render_delete_dialog(frame, dialog);
    }
}

fn render_conversation(frame: &mut Frame, area: Rect, app: &mut App) {
    let notice = notice_line(app);
    let notice_height = u16::from(notice.is_some());
    let composer_rows = composer_height(app, area.width);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(notice_height),
            Constraint::Length(composer_rows),
            Constraint::Length(1),
        ])
        .split(area);

    let messages_area = Rect {
        x: rows[0].x + 1,
        width: rows[0].width.saturating_sub(2),
        ..rows[0]
    };
    render_messages(frame, messages_area, app);

    if let Some(line) = notice {
        frame.render_widget(Paragraph::new(line), rows[1]);
    }
    render_composer(frame, rows[2], app);
    render_disclaimer(frame, rows[3]);
}

/// The failure notice, or failing that the transient status message.
fn notice_line(app: &App) -> Option<Line<'static>> {
    if let Some(notice) = app.session.notice() {
        return Some(Line::from(vec![
            Span::styled(
                " ✗ ",
                Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(notice.message.clone(), Style::default().fg(COLOR_ERROR)),
            Span::styled("  (Esc to dismiss)", Style::default().fg(COLOR_DIM)),
        ]));
    }
    app.status
        .as_ref()
        .map(|status| Line::from(Span::styled(format!(" {}", status), Style::default().fg(COLOR_DIM))))
}
