//! Ratatui widgets for the pokesrc TUI.

pub mod command_bar;
pub mod header;
pub mod help;
pub mod search_bar;
pub mod showcase;
pub mod suggestions;
