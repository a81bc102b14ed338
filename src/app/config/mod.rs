// SPDX-License-Identifier: MPL-2.0
//! User preferences, stored as `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[api]` - Base URL of the event-photography service
//! - `[downloads]` - Where saved photos land
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set `EVENTLENS_CONFIG_DIR` (or pass `--config-dir`)
//! 3. Falls back to the platform-specific config directory
//!
//! Loading never fails the application: a broken or unreadable file degrades
//! to defaults and hands back an i18n warning key for a toast.

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Base URL used when neither the CLI nor the config file names one.
pub const DEFAULT_API_BASE_URL: &str = "https://api.eventlens.example";

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Service endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the event-photography service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Download destination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DownloadsConfig {
    /// Directory saved photos are written to. When unset, the platform
    /// Downloads folder (with the app name appended) is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Root configuration with all sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

impl Config {
    /// Effective API base URL: config value or the built-in default.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Effective download directory, if one can be determined at all.
    #[must_use]
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.downloads
            .directory
            .clone()
            .or_else(paths::get_default_download_dir)
    }
}

/// Loads configuration from the default location.
///
/// Returns `(config, warning)`: on any problem the defaults come back
/// together with an i18n key describing what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads configuration from a custom directory (tests, portable installs).
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_file_path_with_override(base_dir) else {
        return (Config::default(), None);
    };

    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (
            Config::default(),
            Some("notification-config-parse-error".to_string()),
        ),
    }
}

/// Loads configuration from an explicit file path.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| Error::Config(e.to_string()))?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// Saves configuration to the default location, creating directories as
/// needed.
///
/// # Errors
///
/// Returns an error when the directory cannot be resolved or the file cannot
/// be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves configuration under a custom directory.
///
/// # Errors
///
/// Returns an error when the directory cannot be resolved or the file cannot
/// be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = config_file_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("no config directory available".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to an explicit file path.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::Config(e.to_string()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents).map_err(|e| Error::Config(e.to_string()))?;
    Ok(())
}

fn config_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}
