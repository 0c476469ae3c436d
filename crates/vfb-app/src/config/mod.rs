//! Configuration file parsing for the validation browser
//!
//! Supports:
//! - `.vfb/config.toml` - Project-local settings
//! - `<config dir>/validation-browser/config.toml` - User-wide fallback

pub mod settings;
pub mod types;

pub use settings::{
    global_config_path, init_config_dir, load_settings, load_settings_from, token_from_env,
    CONFIG_FILENAME, TOKEN_ENV, VFB_DIR,
};
pub use types::*;
