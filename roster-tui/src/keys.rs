//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    MoveUp,
    MoveDown,
    NewItem,
    EditItem,
    DeleteItem,
    Confirm,
    Cancel,
    NextField,
    PrevField,
    Input(char),
    Backspace,
    DismissNotification,
    ClearNotifications,
}

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Record table has focus.
    Browse,
    /// A text form (add or edit) has focus.
    Form,
    /// The delete confirmation is open.
    Confirm,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<Action> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return None;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match mode {
        InputMode::Form => match code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        InputMode::Confirm => match code {
            KeyCode::Esc | KeyCode::Char('n') => Some(Action::Cancel),
            KeyCode::Enter | KeyCode::Char('y') => Some(Action::Confirm),
            _ => None,
        },
        InputMode::Browse => match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('a') => Some(Action::NewItem),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditItem),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteItem),
            KeyCode::Char('x') => Some(Action::DismissNotification),
            KeyCode::Char('X') => Some(Action::ClearNotifications),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            _ => None,
        },
    }
}
