// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::{dashboard, gallery, login, notifications};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// screen-level messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Login(login::Message),
    Dashboard(dashboard::Message),
    Gallery(gallery::Message),
    Notification(notifications::Message),
    /// Periodic tick driving spinner animation and toast expiry.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional service base URL override.
    /// Takes precedence over the config file's `[api] base_url`.
    pub api_url: Option<String>,
    /// Optional event id to open directly, skipping the dashboard.
    pub event_id: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over the `EVENTLENS_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `EVENTLENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
