//! Pure projection of the record cache into a renderable table.
//!
//! Nothing here touches the terminal; [`crate::views`] draws the result.

use chrono::{Local, TimeZone};
use roster_core::{parse_timestamp, Record};

pub const COLUMNS: [&str; 5] = ["ID", "Name", "Email", "Phone", "Created"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Loading,
    Empty,
    Rows(Vec<RowView>),
}

impl TableView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            TableView::Rows(rows) => rows,
            TableView::Loading | TableView::Empty => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created: String,
}

impl RowView {
    pub fn cells(&self) -> [&str; 5] {
        [&self.id, &self.name, &self.email, &self.phone, &self.created]
    }
}

pub fn project(records: &[Record], loading: bool) -> TableView {
    if loading {
        return TableView::Loading;
    }
    if records.is_empty() {
        return TableView::Empty;
    }
    TableView::Rows(records.iter().map(|r| project_row(r, &Local)).collect())
}

pub fn project_row<Tz>(record: &Record, tz: &Tz) -> RowView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    RowView {
        id: sanitize(&record.id.to_string()),
        name: sanitize(&record.name),
        email: sanitize(&record.email),
        phone: sanitize(record.phone.as_deref().unwrap_or_default()),
        created: format_timestamp(record.created_at.as_deref(), tz),
    }
}

/// Render a server timestamp in `tz`; unparsable input is shown as-is.
pub fn format_timestamp<Tz>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return String::new();
    };
    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => sanitize(raw),
    }
}

/// Replace control characters with their escaped form so record text cannot
/// move the cursor or change terminal modes.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}
