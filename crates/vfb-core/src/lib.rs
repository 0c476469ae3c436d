//! # vfb-core - Core Domain Types
//!
//! Foundation crate for the validation framework browser. Provides the filter
//! and display model, the codecs that move them in and out of query strings
//! and host messages, fragment parsing, remote record types, error handling
//! and logging.
//!
//! This crate has **no internal dependencies** and performs no I/O beyond
//! logging setup.
//!
//! ## Public API
//!
//! ### Filters and Display (`filters`, `display`)
//! - [`FilterKey`] - The declared set of filterable attributes, in order
//! - [`FilterConfiguration`] - Selected values for every filter key
//! - [`DisplayMode`] - Which collections the main view shows
//! - [`Collection`] - Models or tests
//!
//! ### Codec (`codec`)
//! - [`encode_filters()`] / [`decode_filters()`] - REST and launch query strings
//! - [`encode_for_host()`] / [`HostPayload`] - Delimiter-joined host message data
//! - [`decode_display_mode()`] - Display mode with fallback
//!
//! ### Locations (`fragment`, `location`)
//! - [`FragmentToken`], [`QueryKey`] - `key.value` tokens naming one entity
//! - [`LaunchLocation`] - Filters, display and fragment from a launch URL
//! - [`share_url()`] - Rebuild a link reproducing the current view
//!
//! ### Records (`entity`)
//! - [`Model`], [`Test`], [`ValidationResult`], [`ResultFile`], [`Version`]
//! - [`Record`] - Shared accessors, [`EntityKind`], [`Entity`]
//!
//! ### Host Messages (`host`)
//! - [`HostMessage`], [`HostNotifier`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum, one variant per failure the user can see
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use vfb_core::prelude::*;
//! ```

pub mod codec;
pub mod display;
pub mod entity;
pub mod error;
pub mod filters;
pub mod fragment;
pub mod host;
pub mod location;
pub mod logging;

/// Prelude for common imports used throughout all validation browser crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use codec::{
    decode_display_mode, decode_display_param, decode_filters, encode_filters, encode_for_host,
    encode_location_query, HostPayload, DISPLAY_PARAM,
};
pub use display::{Collection, DisplayMode};
pub use entity::{
    format_authors, format_date, value_to_text, CollabStorage, Entity, EntityKind, Model, Person,
    Record, ResultFile, Test, ValidationResult, Version,
};
pub use error::{Error, Result, ResultExt};
pub use filters::{FilterConfiguration, FilterKey, SETTINGS_DELIMITER};
pub use fragment::{is_uuid, FragmentToken, QueryKey};
pub use host::{HostMessage, HostNotifier, UPDATE_SETTINGS_TOPIC};
pub use location::{share_url, LaunchLocation};
