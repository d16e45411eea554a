//! Event types for the TUI event loop.

use crate::state::Response;
use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// A background store call finished.
    Store(Box<Response>),
}
