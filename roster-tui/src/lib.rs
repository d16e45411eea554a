//! Roster TUI library exports.

pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod keys;
pub mod logging;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod view_model;
pub mod views;
pub mod widgets;
