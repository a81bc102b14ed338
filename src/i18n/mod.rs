// SPDX-License-Identifier: MPL-2.0
//! Internationalization via Fluent.
//!
//! Locale resolution order: CLI `--lang`, then the config file, then the OS
//! locale, then `en-US`.

pub mod fluent;
