//! Stacked notification toasts, newest at the bottom.

use crate::notifications::Notification;
use crate::theme::{notification_color, notification_label, SynthBruteTheme};
use crate::view_model::sanitize;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct ToastStack<'a> {
    pub notifications: &'a [Notification],
    pub theme: &'a SynthBruteTheme,
    pub max_visible: usize,
}

impl ToastStack<'_> {
    /// Height needed to draw the visible toasts, borders included.
    pub fn height(&self) -> u16 {
        let visible = self.notifications.len().min(self.max_visible) as u16;
        if visible == 0 {
            0
        } else {
            visible + 2
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        if self.notifications.is_empty() || area.height == 0 {
            return;
        }
        let skip = self.notifications.len().saturating_sub(self.max_visible);
        let lines: Vec<Line> = self
            .notifications
            .iter()
            .skip(skip)
            .map(|note| {
                let color = notification_color(note.kind, self.theme);
                Line::from(vec![
                    Span::styled(
                        format!("[{}] {} ", notification_label(note.kind), sanitize(&note.title)),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(sanitize(&note.message), Style::default().fg(self.theme.text)),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Notifications [x dismiss]")
            .border_style(Style::default().fg(self.theme.border));
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
