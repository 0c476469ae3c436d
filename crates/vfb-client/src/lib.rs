//! # vfb-client - Data Sources and Host Messaging
//!
//! I/O layer of the validation framework browser.
//!
//! ## Public API
//!
//! - [`ValidationApi`] - Async access to models, tests and results
//! - [`RestClient`] - HTTP implementation with bearer authentication
//! - [`OfflineStore`] - JSON-file implementation for offline work
//! - [`PostMessageNotifier`] - Delivers host messages to a trusted endpoint
//! - [`endpoints`] - URL builders for every REST call

pub mod api;
pub mod endpoints;
pub mod host;
pub mod offline;
pub mod rest;
pub mod types;

pub use api::{LocalValidationApi, ValidationApi};
pub use host::{same_origin, PostMessageNotifier};
pub use offline::OfflineStore;
pub use rest::RestClient;
