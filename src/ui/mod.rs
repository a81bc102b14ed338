// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! All screens follow the Elm-style "state down, messages up" pattern: a
//! screen owns a `State` with an `update` that returns an event for the
//! parent application to act on, and a `view` over borrowed state.
//!
//! # Screens
//!
//! - [`login`] - Authentication view (email → session)
//! - [`dashboard`] - The attendee's events
//! - [`gallery`] - An event's matched photos with download actions
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - SVG icon loading and rendering
//! - [`notifications`] - Toast notification system for user feedback
//! - [`dates`] - Event date rendering

pub mod dashboard;
pub mod dates;
pub mod design_tokens;
pub mod gallery;
pub mod icons;
pub mod login;
pub mod notifications;
pub mod styles;
pub mod theming;
pub mod widgets;
