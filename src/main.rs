//! Validation Browser - terminal browser for the model validation framework
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use vfb_app::config::{init_config_dir, load_settings, load_settings_from, token_from_env, Settings};
use vfb_app::{AppState, HostBridge, NullNotifier};
use vfb_client::{OfflineStore, PostMessageNotifier, RestClient};
use vfb_core::{HostNotifier, LaunchLocation};

/// Browse models, tests and validation results
#[derive(Parser, Debug)]
#[command(name = "vfb")]
#[command(about = "Terminal browser for the model validation framework", long_about = None)]
struct Args {
    /// Launch location: a full URL or `?species=...&display=...#model_alias.X`
    #[arg(value_name = "LOCATION")]
    location: Option<String>,

    /// Directory holding `.vfb/config.toml` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    project: Option<PathBuf>,

    /// Read settings from this file instead
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Root of the validation REST API
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token (also read from VFB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Behave as if embedded in a host page
    #[arg(long)]
    embedded: bool,

    /// Serve models, tests and results from a JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    offline: Option<PathBuf>,

    /// Write a default `.vfb/config.toml` and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    /// Command-line values take precedence over the configuration file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.api.base_url = base_url.clone();
        }
        if let Some(token) = self.token.clone().or_else(token_from_env) {
            settings.api.token = token;
        }
        if self.embedded {
            settings.host.embedded = true;
        }
        if let Some(path) = &self.offline {
            settings.api.offline_data = Some(path.clone());
        }
    }
}

fn host_bridge(settings: &Settings) -> HostBridge {
    let notifier: Arc<dyn HostNotifier> = if settings.host.endpoint.is_empty() {
        Arc::new(NullNotifier)
    } else {
        let notifier =
            PostMessageNotifier::new(&settings.host.endpoint, &settings.host.trusted_origin);
        if !notifier.is_trusted() {
            warn!(
                "Host endpoint {} is outside {}, settings updates will be dropped",
                settings.host.endpoint, settings.host.trusted_origin
            );
        }
        Arc::new(notifier)
    };
    HostBridge::new(settings.host.embedded, notifier)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let project = args
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init_config {
        let path = init_config_dir(&project)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    if let Err(e) = vfb_core::logging::init() {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(&project),
    };
    args.apply(&mut settings);

    let location = match &args.location {
        Some(location) => LaunchLocation::parse(location)?,
        None => LaunchLocation::default(),
    };
    info!("Launching with {:?}", location);

    let bridge = host_bridge(&settings);
    let state = AppState::with_settings(settings.clone(), location);

    match &settings.api.offline_data {
        Some(path) => {
            info!("Using offline data from {}", path.display());
            let store = OfflineStore::load(path)?;
            vfb_tui::run(state, store, bridge).await?;
        }
        None => {
            let client = RestClient::new(settings.api.base_url.clone(), settings.token())?;
            vfb_tui::run(state, client, bridge).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let args = Args::parse_from([
            "vfb",
            "--base-url",
            "http://localhost:8000",
            "--token",
            "abc",
            "--embedded",
        ]);
        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.token, "abc");
        assert!(settings.host.embedded);
    }

    #[test]
    fn test_location_is_positional() {
        let args = Args::parse_from(["vfb", "?species=Mus%20musculus#model_alias.CA1"]);
        assert_eq!(
            args.location.as_deref(),
            Some("?species=Mus%20musculus#model_alias.CA1")
        );
    }

    #[test]
    fn test_bridge_outside_host_is_inert() {
        let bridge = host_bridge(&Settings::default());
        assert!(!bridge.is_embedded());
    }
}
