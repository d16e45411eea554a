//! Record table with a detail pane for the selected row.

use crate::state::App;
use crate::view_model::{format_timestamp, sanitize, TableView, COLUMNS};
use crate::widgets::DetailPanel;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use roster_client::RecordStore;

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(10),
    Constraint::Percentage(25),
    Constraint::Percentage(30),
    Constraint::Percentage(18),
    Constraint::Length(19),
];

pub fn render<S: RecordStore>(f: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let block = Block::default()
        .title("Records")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    match app.table_view() {
        TableView::Loading => placeholder(f, block, chunks[0], "Loading records...", app.theme.info),
        TableView::Empty => placeholder(
            f,
            block,
            chunks[0],
            "No records yet. Press 'a' to add one.",
            app.theme.text_dim,
        ),
        TableView::Rows(rows) => {
            let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
                Style::default()
                    .fg(app.theme.secondary)
                    .add_modifier(Modifier::BOLD),
            );
            let body: Vec<Row> = rows
                .iter()
                .map(|row| Row::new(row.cells().map(|c| Cell::from(c.to_string()))))
                .collect();
            let table = Table::new(body, WIDTHS)
                .header(header)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(app.theme.primary)
                        .bg(app.theme.bg_highlight),
                )
                .highlight_symbol("> ");
            let mut state = TableState::default().with_selected(app.selected_index());
            f.render_stateful_widget(table, chunks[0], &mut state);
        }
    }

    let mut fields = Vec::new();
    if let Some(record) = app.selected_record() {
        fields.push(("ID", sanitize(&record.id.to_string())));
        fields.push(("Name", sanitize(&record.name)));
        fields.push(("Email", sanitize(&record.email)));
        fields.push(("Phone", sanitize(record.phone.as_deref().unwrap_or_default())));
        fields.push((
            "Created",
            format_timestamp(record.created_at.as_deref(), &Local),
        ));
    }
    DetailPanel {
        title: "Details",
        fields,
        style: Style::default().fg(app.theme.secondary),
    }
    .render(f, chunks[1]);
}

fn placeholder(
    f: &mut Frame<'_>,
    block: Block<'_>,
    area: Rect,
    text: &str,
    color: ratatui::style::Color,
) {
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(block);
    f.render_widget(paragraph, area);
}
