//! Custom widget components

mod config_dialog;
pub mod detail_dialog;
pub mod entity_table;
mod error_dialog;
mod header;
mod introduction;
pub mod modal_overlay;
mod status_bar;

pub use config_dialog::ConfigDialog;
pub use detail_dialog::{OwnerDetailDialog, ResultDetailDialog};
pub use entity_table::EntityTable;
pub use error_dialog::ErrorDialog;
pub use header::{MainHeader, APP_TITLE};
pub use introduction::Introduction;
pub use status_bar::StatusBar;
