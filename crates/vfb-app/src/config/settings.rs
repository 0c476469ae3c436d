//! Settings loading and the default configuration file

use std::path::{Path, PathBuf};

use vfb_core::prelude::*;

use super::types::Settings;

pub const VFB_DIR: &str = ".vfb";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const TOKEN_ENV: &str = "VFB_TOKEN";

/// User-wide configuration file, used when the project has none.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("validation-browser").join(CONFIG_FILENAME))
}

/// Load settings from `.vfb/config.toml`, falling back to the user-wide file
/// and then to defaults. A token in `VFB_TOKEN` replaces the configured one.
pub fn load_settings(project_path: &Path) -> Settings {
    let local = project_path.join(VFB_DIR).join(CONFIG_FILENAME);
    let path = if local.exists() {
        Some(local.clone())
    } else {
        global_config_path().filter(|p| p.exists())
    };

    let mut settings = match path {
        Some(path) => load_settings_from(&path),
        None => {
            debug!("No config file at {:?}, using defaults", local);
            Settings::default()
        }
    };

    if let Some(token) = token_from_env() {
        debug!("Using API token from {}", TOKEN_ENV);
        settings.api.token = token;
    }
    settings
}

/// Parse one settings file. Unreadable or invalid files yield defaults.
pub fn load_settings_from(config_path: &Path) -> Settings {
    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Create `.vfb/config.toml` with commented defaults unless it exists.
pub fn init_config_dir(project_path: &Path) -> Result<PathBuf> {
    let vfb_dir = project_path.join(VFB_DIR);

    if !vfb_dir.exists() {
        std::fs::create_dir_all(&vfb_dir)
            .with_context(|| format!("Failed to create {}", vfb_dir.display()))?;
    }

    let config_path = vfb_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Validation Browser Configuration

[api]
base_url = "https://validation-v2.brainsimulation.eu"
token = ""              # bearer token; VFB_TOKEN overrides
# offline_data = "models.json"

[host]
embedded = false
trusted_origin = "https://wiki.ebrains.eu"
endpoint = ""           # where settings updates are POSTed

[ui]
app_url = "https://validation.brainsimulation.eu/"
export_dir = "."
"#;
        std::fs::write(&config_path, default_content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        info!("Created {:?}", config_path);
    }

    Ok(config_path)
}
