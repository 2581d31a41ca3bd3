pub mod commands;
pub mod config;
pub mod document;
pub mod spy;
pub mod tui;
