//! vfb-app - Application state and orchestration for the validation browser
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: `update(&mut AppState, Message)` is the only place state
//! changes, and I/O happens in actions that report back with messages. It
//! also owns configuration loading and the host notification bridge.

pub mod actions;
pub mod config;
pub mod config_dialog;
pub mod detail_state;
pub mod handler;
pub mod host;
pub mod input_key;
pub mod list_state;
pub mod message;
pub mod process;
pub mod state;

// Re-export primary types
pub use actions::{handle_action, ActionContext, RequestTracker};
pub use handler::{update, RequestSlot, UpdateAction, UpdateResult};
pub use host::{HostBridge, NullNotifier};
pub use input_key::InputKey;
pub use message::{CollectionItems, Message};
pub use process::process_message;
pub use state::{AppState, TableLayout, UiMode};
