//! SynthBrute theme and color utilities.

use crate::notifications::NotificationKind;
use crate::state::Connectivity;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

pub fn notification_color(kind: NotificationKind, theme: &SynthBruteTheme) -> Color {
    match kind {
        NotificationKind::Info => theme.info,
        NotificationKind::Error => theme.error,
        NotificationKind::Success => theme.success,
    }
}

pub fn notification_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "INFO",
        NotificationKind::Error => "ERROR",
        NotificationKind::Success => "OK",
    }
}

pub fn connectivity_color(connectivity: Connectivity, theme: &SynthBruteTheme) -> Color {
    match connectivity {
        Connectivity::Online => theme.success,
        Connectivity::Offline => theme.warning,
    }
}
