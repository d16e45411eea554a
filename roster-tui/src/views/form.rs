//! Add/edit form overlay.

use crate::forms::{FormField, RecordForm};
use crate::state::App;
use crate::view_model::sanitize;
use crate::views::modal::modal_area;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use roster_client::RecordStore;

pub fn render<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>, title: &str, form: &RecordForm) {
    let area = modal_area(f.size());
    let title = if form.is_submitting() {
        format!("{} (saving...)", title)
    } else {
        title.to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focus));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (index, field) in FormField::all().iter().enumerate() {
        let focused = form.focus == *field;
        let border = if focused {
            app.theme.primary
        } else {
            app.theme.border
        };
        let mut spans = vec![Span::styled(
            sanitize(form.value(*field)),
            Style::default().fg(app.theme.text),
        )];
        if focused {
            spans.push(Span::styled(
                "_",
                Style::default()
                    .fg(app.theme.primary)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        let label = match field {
            FormField::Phone => field.label().to_string(),
            _ => format!("{} *", field.label()),
        };
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(input, rows[index]);
    }
}
