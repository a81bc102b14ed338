// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! The only subscription is a periodic tick, and it only runs while
//! something needs it: fast while a spinner animates, slow while toasts are
//! waiting to expire, absent otherwise.

use super::{App, Message, Screen};
use iced::{time, Subscription};
use std::time::Duration;

/// Spinner frame interval.
const SPINNER_TICK: Duration = Duration::from_millis(50);

/// Toast expiry check interval.
const NOTIFICATION_TICK: Duration = Duration::from_millis(500);

/// Creates the tick subscription appropriate for the current state.
pub fn subscription(app: &App) -> Subscription<Message> {
    let spinner_active = match app.screen {
        Screen::Login => false,
        Screen::Dashboard => app.dashboard.is_loading(),
        Screen::Gallery => app.gallery.as_ref().is_some_and(|g| g.is_loading()),
    };

    if spinner_active {
        time::every(SPINNER_TICK).map(Message::Tick)
    } else if app.notifications.has_notifications() {
        time::every(NOTIFICATION_TICK).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
