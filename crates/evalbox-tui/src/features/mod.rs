//! Feature slices of the TUI: command editor, history table, notifications.

pub mod editor;
pub mod history;
pub mod notification;
