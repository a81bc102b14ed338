// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! This holds transient state that should survive restarts but is not
//! user-configurable (unlike preferences in `settings.toml`): most
//! importantly the signed-in attendee email, which is the whole "session"
//! this service has.
//!
//! # Path Resolution
//!
//! 1. `load_from()`/`save_to()` with an explicit directory (tests)
//! 2. `EVENTLENS_DATA_DIR` environment variable / `--data-dir`
//! 3. Platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Email of the signed-in attendee; `None` means signed out and the
    /// application starts on the login screen.
    #[serde(default)]
    pub session_email: Option<String>,

    /// Last event whose gallery was open, for a convenient return visit.
    #[serde(default)]
    pub last_event_id: Option<String>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns `(state, warning)`: a broken file degrades to defaults with an
    /// i18n warning key, never an error.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(state) => (state, None),
                    Err(_) => (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    ),
                }
            }
            Err(_) => (
                Self::default(),
                Some("notification-state-read-error".to_string()),
            ),
        }
    }

    /// Saves application state to the default location, creating the parent
    /// directory if needed. Returns an i18n warning key on failure.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                if ciborium::into_writer(self, writer).is_err() {
                    return Some("notification-state-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-state-create-error".to_string()),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}
