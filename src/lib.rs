// SPDX-License-Identifier: MPL-2.0
//! `eventlens` is a desktop gallery for event attendees, built with the Iced
//! GUI framework.
//!
//! Attendees sign in with the email they registered with, pick one of their
//! events, and browse the photos a separate matching process associated with
//! them: downloading any of them individually or all at once.

#![doc(html_root_url = "https://docs.rs/eventlens/0.2.0")]

pub mod api;
pub mod app;
pub mod download;
pub mod error;
pub mod i18n;
pub mod session;
pub mod ui;
