//! View rendering dispatch.
//!
//! The drawing adapter: reads the controller and the projected table view
//! and paints them. No state changes happen here.

pub mod form;
pub mod modal;
pub mod table;

pub use modal::modal_area;

use crate::state::{App, Connectivity};
use crate::theme::connectivity_color;
use crate::view_model::sanitize;
use crate::widgets::{StatusIndicator, ToastStack};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use roster_client::RecordStore;

const MAX_TOASTS: usize = 4;

pub fn render_view<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>) {
    let toasts = ToastStack {
        notifications: app.notifications.active(),
        theme: &app.theme,
        max_visible: MAX_TOASTS,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(toasts.height()),
            Constraint::Length(3),
        ])
        .split(f.size());

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg)),
        f.size(),
    );
    render_header(f, app, layout[0]);
    table::render(f, app, layout[1]);
    toasts.render(f, layout[2]);
    render_footer(f, app, layout[3]);

    if let Some(form) = app.add_form.as_ref() {
        form::render(f, app, "Add Record", form);
    } else if let Some(modal) = app.edit_modal.as_ref() {
        let title = format!("Edit Record {}", sanitize(&modal.target.to_string()));
        form::render(f, app, &title, &modal.form);
    }
    if let Some(modal) = app.delete_modal.as_ref() {
        modal::render_delete(f, app, modal);
    }
}

fn render_header<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(area);

    let title = format!("ROSTER | {} records", app.records.len());
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, chunks[0]);

    let status = match app.connectivity {
        _ if app.in_flight => "syncing",
        Connectivity::Online => "online",
        Connectivity::Offline => "offline",
    };
    StatusIndicator {
        title: "Link",
        status: status.to_string(),
        style: Style::default().fg(connectivity_color(app.connectivity, &app.theme)),
    }
    .render(f, chunks[1]);
}

fn render_footer<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let help = if app.delete_modal.is_some() {
        "y/Enter confirm • n/Esc cancel"
    } else if app.has_modal() {
        "Tab next field • Enter submit • Esc cancel"
    } else {
        "j/k move • a add • e edit • d delete • r refresh • x dismiss • q quit"
    };
    let footer = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(app.theme.text_dim));
    f.render_widget(footer, area);
}
