//! Layered configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, the XDG
//! config file (`roster/config.toml`), a `roster.toml` in the working
//! directory, then `ROSTER_`-prefixed environment variables with `__`
//! separating section from key (`ROSTER_GITHUB__TOKEN`). Command-line
//! flags override all of these in the command handlers.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

/// Complete configuration with defaults filled in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Directory service settings.
    pub github: GithubConfig,
    /// Sync run settings.
    pub sync: SyncSettings,
}

/// Directory service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Web host whose profile links the extractor matches.
    pub host: String,
    /// API credential. The `--token` flag and `GITHUB_TOKEN` take
    /// precedence over this.
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: roster::github::GITHUB_API_URL.to_string(),
            host: roster::extract::DEFAULT_PROFILE_HOST.to_string(),
            token: None,
        }
    }
}

/// Sync run settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Snapshot file the engine reads and writes.
    pub snapshot_path: PathBuf,
    /// Page scanned for profile links.
    pub page_path: PathBuf,
    /// Refetch everything, ignoring cache freshness.
    pub force: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("contributors.json"),
            page_path: PathBuf::from("index.html"),
            force: false,
        }
    }
}

/// Load configuration from all sources.
///
/// Missing files are fine; an unreadable or invalid configuration
/// degrades to defaults with a warning rather than refusing to run.
pub fn load_config() -> RosterConfig {
    let mut builder = Config::builder();

    if let Some(dirs) = ProjectDirs::from("", "", "roster") {
        let xdg_config = dirs.config_dir().join("config.toml");
        builder = builder.add_source(File::from(xdg_config).required(false));
    }
    builder = builder
        .add_source(File::with_name("roster").required(false))
        .add_source(Environment::with_prefix("ROSTER").separator("__"));

    match builder.build().and_then(|config| config.try_deserialize()) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "configuration unusable, using defaults");
            RosterConfig::default()
        }
    }
}
