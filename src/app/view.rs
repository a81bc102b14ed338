// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen and stacks the toast overlay on top.

use super::{App, Message, Screen};
use crate::ui::login;
use iced::widget::{Container, Stack, Text};
use iced::{Element, Length};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match app.screen {
        Screen::Login => app
            .login
            .view(login::ViewContext { i18n: &app.i18n })
            .map(Message::Login),
        Screen::Dashboard => {
            let email = app.session.as_ref().map_or("", |s| s.email());
            app.dashboard
                .view(&app.i18n, email)
                .map(Message::Dashboard)
        }
        Screen::Gallery => match &app.gallery {
            Some(gallery) => gallery.view(&app.i18n).map(Message::Gallery),
            // Fallback if the gallery state is missing
            None => Container::new(Text::new("Gallery error"))
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        },
    };

    let toasts = app.notifications.view(&app.i18n).map(Message::Notification);

    Stack::new()
        .push(
            Container::new(screen)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(toasts)
        .into()
}
