use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::comments::DEFAULT_AUTHOR;
use crate::dock::ToolbarBands;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "pinmark";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_INBOX_PADDING: f64 = 16.0;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Name written on new comments and replies.
    pub(crate) author: Option<String>,
    pub(crate) toolbar: ToolbarConfig,
    pub(crate) inbox_padding: f64,
    /// Load the demonstration comments into the store at startup.
    pub(crate) seed_fixture: bool,
    /// Default `tracing` filter when no environment override is set.
    pub(crate) log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            author: None,
            toolbar: ToolbarConfig::default(),
            inbox_padding: DEFAULT_INBOX_PADDING,
            seed_fixture: true,
            log_filter: None,
        }
    }
}

impl AppConfig {
    pub(crate) fn author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|author| !author.trim().is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct ToolbarConfig {
    pub(crate) edge_band: f64,
    pub(crate) side_band: f64,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        let bands = ToolbarBands::default();
        Self {
            edge_band: bands.edge,
            side_band: bands.side,
        }
    }
}

impl ToolbarConfig {
    pub(crate) fn bands(self) -> ToolbarBands {
        ToolbarBands {
            edge: self.edge_band.max(0.0),
            side: self.side_band.max(0.0),
        }
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_app_config(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn parse_app_config(contents: &str) -> Result<AppConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
