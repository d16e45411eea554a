//! Modal overlays.

use crate::state::{App, DeleteModal};
use crate::view_model::sanitize;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use roster_client::RecordStore;

/// Area covered by any modal for a given screen. Clicks outside it close the
/// modal.
pub fn modal_area(screen: Rect) -> Rect {
    centered_rect(60, 40, screen)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Whether a click at (`column`, `row`) falls outside the modal.
pub fn is_outside_modal(screen: Rect, column: u16, row: u16) -> bool {
    let area = modal_area(screen);
    column < area.x
        || column >= area.x.saturating_add(area.width)
        || row < area.y
        || row >= area.y.saturating_add(area.height)
}

pub fn render_delete<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>, modal: &DeleteModal) {
    let area = modal_area(f.size());
    let lines = vec![
        Line::from("Delete this record?"),
        Line::from(""),
        Line::from(Span::styled(
            sanitize(&modal.summary),
            Style::default()
                .fg(app.theme.tertiary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Delete   [n] Cancel",
            Style::default().fg(app.theme.text_dim),
        )),
    ];
    let block = Block::default()
        .title("Confirm Delete")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.error));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
