// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module.
//!
//! Icons are single-color SVGs embedded at compile time via `include_bytes!`
//! and recolored at render time through the widget style, so one asset serves
//! both themes. Handles are cached with `OnceLock`: parsing an SVG once per
//! process is enough.
//!
//! # Naming Convention
//!
//! Icons use generic visual names describing the icon's appearance,
//! not the action context (e.g., `arrow_down_tray` not `download_photo`).

use iced::widget::svg::{Handle, Svg};
use iced::{Color, Length};
use std::sync::OnceLock;

/// Defines an icon function with a cached handle.
macro_rules! define_icon {
    ($name:ident, $filename:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<'a>() -> Svg<'a> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            static DATA: &[u8] = include_bytes!(concat!("../../assets/icons/", $filename));
            let handle = HANDLE.get_or_init(|| Handle::from_memory(DATA));
            Svg::new(handle.clone())
        }
    };
}

define_icon!(arrow_down_tray, "arrow-down-tray.svg", "Downward arrow into a tray.");
define_icon!(picture, "picture.svg", "Framed landscape picture.");
define_icon!(chevron_left, "chevron-left.svg", "Left-pointing chevron.");
define_icon!(cross, "cross.svg", "Diagonal cross (dismiss).");
define_icon!(door_exit, "door-exit.svg", "Doorway with outgoing arrow.");
define_icon!(arrows_cycle, "arrows-cycle.svg", "Two arrows in a cycle.");
define_icon!(calendar, "calendar.svg", "Calendar page.");
define_icon!(circle_check, "circle-check.svg", "Check mark in a circle.");
define_icon!(circle_info, "circle-info.svg", "Letter i in a circle.");
define_icon!(triangle_alert, "triangle-alert.svg", "Exclamation mark in a triangle.");
define_icon!(circle_cross, "circle-cross.svg", "Cross in a circle.");

/// Sizes an icon to a square of the given side length.
#[must_use]
pub fn sized<'a>(icon: Svg<'a>, side: f32) -> Svg<'a> {
    icon.width(Length::Fixed(side)).height(Length::Fixed(side))
}

/// Recolors a single-color icon.
#[must_use]
pub fn tinted<'a>(icon: Svg<'a>, color: Color) -> Svg<'a> {
    icon.style(move |_theme, _status| iced::widget::svg::Style { color: Some(color) })
}
