//! Delete confirmation dialog.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::{centered_rect, truncate_to_width};
use super::theme::{COLOR_ACCENT, COLOR_DIALOG_BG, COLOR_DIM, COLOR_ERROR};
use crate::app::DeleteDialog;

pub const DELETE_TITLE: &str = "Delete Chat?";
pub const DELETE_BODY: &str =
    "This action cannot be undone. This will permanently delete the chat history.";

const DIALOG_WIDTH: u16 = 52;
const DIALOG_HEIGHT: u16 = 9;

pub fn render_delete_dialog(frame: &mut Frame, dialog: &DeleteDialog) {
    let area = centered_rect(frame.area(), DIALOG_WIDTH, DIALOG_HEIGHT);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ERROR))
        .style(Style::default().bg(COLOR_DIALOG_BG))
        .title(Span::styled(
            format!(" {} ", DELETE_TITLE),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = truncate_to_width(&dialog.title, inner.width.saturating_sub(2) as usize);
    let lines = vec![
        Line::from(Span::styled(title, Style::default().fg(COLOR_ACCENT))),
        Line::from(""),
        Line::from(Span::styled(DELETE_BODY, Style::default().fg(COLOR_DIM))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)),
            Span::styled("Delete   ", Style::default().fg(COLOR_ACCENT)),
            Span::styled("[n] ", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("Cancel", Style::default().fg(COLOR_ACCENT)),
        ]),
    ];

    let content = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left),
        content,
    );
}
