//! Configuration types for the validation browser
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ApiSettings`, `HostSettings`, `UiSettings` - Per-section settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://validation-v2.brainsimulation.eu";
pub const DEFAULT_TRUSTED_ORIGIN: &str = "https://wiki.ebrains.eu";
pub const DEFAULT_APP_URL: &str = "https://validation.brainsimulation.eu/";

/// Global application settings from `.vfb/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub host: HostSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Root of the validation REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request (empty = anonymous)
    #[serde(default)]
    pub token: String,

    /// JSON file used instead of the network when set
    #[serde(default)]
    pub offline_data: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            offline_data: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Embedding host settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostSettings {
    /// Running inside a host that should receive settings updates
    #[serde(default)]
    pub embedded: bool,

    /// Only endpoints on this origin receive host messages
    #[serde(default = "default_trusted_origin")]
    pub trusted_origin: String,

    /// Where host messages are POSTed
    #[serde(default)]
    pub endpoint: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            embedded: false,
            trusted_origin: default_trusted_origin(),
            endpoint: String::new(),
        }
    }
}

fn default_trusted_origin() -> String {
    DEFAULT_TRUSTED_ORIGIN.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Base of shareable links
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Directory receiving exported JSON records
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Settings {
    pub fn token(&self) -> Option<String> {
        let token = self.api.token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}
