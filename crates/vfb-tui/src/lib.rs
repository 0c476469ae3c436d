//! vfb-tui - Terminal UI for the validation framework browser
//!
//! This crate provides the ratatui-based view layer. It drives the vfb-app
//! TEA loop: terminal events and finished requests become messages, and the
//! state is rendered after every batch.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
