//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `sync`: Remote list refreshes and their completions
//! - `detail`: Fragment resolution and detail views
//! - `config`: Configuration dialog
//! - `toolbar`: Table width, hiding and export
//! - `keys`: Key event handlers for UI modes

pub(crate) mod config;
pub(crate) mod detail;
pub(crate) mod keys;
pub(crate) mod sync;
pub(crate) mod toolbar;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use vfb_core::{Collection, DisplayMode, FilterConfiguration, FragmentToken};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Independent request slots. A new request in a slot aborts the previous
/// one still running in that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    List(Collection),
    Lookup,
    Results(Collection),
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch a collection filtered by `filters`
    FetchList {
        collection: Collection,
        filters: FilterConfiguration,
        generation: u64,
    },

    /// Fetch every record matching a fragment token
    FetchEntity { token: FragmentToken, generation: u64 },

    /// Fetch the results of an open model or test detail
    FetchResults {
        owner: Collection,
        id: String,
        generation: u64,
    },

    /// Abort whatever runs in a slot
    CancelRequest(RequestSlot),

    /// Push settings to the embedding host
    NotifyHost {
        filters: Option<FilterConfiguration>,
        display: Option<DisplayMode>,
    },

    /// Write a record to disk
    ExportRecord { path: PathBuf, json: String },
}

impl UpdateAction {
    /// Slot a request action occupies, if any.
    pub fn slot(&self) -> Option<RequestSlot> {
        match self {
            UpdateAction::FetchList { collection, .. } => Some(RequestSlot::List(*collection)),
            UpdateAction::FetchEntity { .. } => Some(RequestSlot::Lookup),
            UpdateAction::FetchResults { owner, .. } => Some(RequestSlot::Results(*owner)),
            _ => None,
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}
