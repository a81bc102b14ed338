// SPDX-License-Identifier: MPL-2.0
//! Login screen: the authentication view.
//!
//! There is no password: the service identifies attendees by email alone,
//! so "signing in" means remembering a plausible address and moving on. The
//! dashboard's collaborator calls are the real test of whether the service
//! knows it.

use crate::i18n::fluent::I18n;
use crate::session::is_plausible_email;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Login screen state: just the email being typed.
#[derive(Debug, Clone, Default)]
pub struct State {
    email: String,
}

/// Messages emitted by the login screen.
#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    Submit,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The user confirmed a plausible email.
    Submitted(String),
}

/// Contextual data needed to render the login screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a login message and return the corresponding event.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::EmailChanged(email) => {
                self.email = email;
                Event::None
            }
            Message::Submit => {
                if is_plausible_email(&self.email) {
                    Event::Submitted(self.email.trim().to_string())
                } else {
                    Event::None
                }
            }
        }
    }

    /// Render the login screen.
    pub fn view(&self, ctx: ViewContext<'_>) -> Element<'_, Message> {
        let title = Text::new(ctx.i18n.tr("login-title")).size(typography::TITLE_LG);
        let subtitle = Text::new(ctx.i18n.tr("login-subtitle"))
            .size(typography::BODY)
            .style(|theme: &Theme| iced::widget::text::Style {
                color: Some(theme.extended_palette().background.strong.color),
            });

        let email_input = text_input(&ctx.i18n.tr("login-email-placeholder"), &self.email)
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit)
            .padding(spacing::SM)
            .width(Length::Fixed(sizing::LOGIN_FORM_WIDTH));

        let submit = button(Text::new(ctx.i18n.tr("login-button")))
            .on_press_maybe(is_plausible_email(&self.email).then_some(Message::Submit))
            .padding([spacing::XS, spacing::LG])
            .style(styles::button::primary);

        let hint = Text::new(ctx.i18n.tr("login-hint")).size(typography::CAPTION).style(
            |theme: &Theme| iced::widget::text::Style {
                color: Some(theme.extended_palette().background.strong.color),
            },
        );

        let form = Column::new()
            .spacing(spacing::LG)
            .align_x(alignment::Horizontal::Center)
            .push(title)
            .push(subtitle)
            .push(email_input)
            .push(submit)
            .push(hint);

        Container::new(
            Container::new(form)
                .padding(spacing::XL)
                .style(styles::container::panel),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_updates_state_without_event() {
        let mut state = State::new();
        let event = state.update(Message::EmailChanged("ada@example.com".to_string()));
        assert!(matches!(event, Event::None));
        assert_eq!(state.email, "ada@example.com");
    }

    #[test]
    fn submit_with_plausible_email_emits_event() {
        let mut state = State::new();
        state.update(Message::EmailChanged("  ada@example.com ".to_string()));
        let event = state.update(Message::Submit);
        match event {
            Event::Submitted(email) => assert_eq!(email, "ada@example.com"),
            Event::None => panic!("expected Submitted"),
        }
    }

    #[test]
    fn submit_with_implausible_email_is_ignored() {
        let mut state = State::new();
        state.update(Message::EmailChanged("not-an-email".to_string()));
        assert!(matches!(state.update(Message::Submit), Event::None));
    }
}
