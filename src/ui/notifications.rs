// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! EventLens never blocks the user with modal dialogs; everything the source
//! of an action wants to say (bulk download started, some photos failed,
//! settings file unreadable) goes through these toasts. Success and info
//! toasts dismiss themselves; warnings stay longer; errors wait for the user.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::icons;
use iced::widget::svg::Svg;
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of toasts on screen; the rest wait in a queue.
const MAX_VISIBLE: usize = 3;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity determines color and how long a toast stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Info => palette::INFO_500,
            Severity::Success => palette::SUCCESS_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// `None` means manual dismiss only.
    #[must_use]
    pub fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Severity::Info | Severity::Success => Some(Duration::from_secs(4)),
            Severity::Warning => Some(Duration::from_secs(7)),
            Severity::Error => None,
        }
    }

    fn icon(self) -> Svg<'static> {
        match self {
            Severity::Info => icons::circle_info(),
            Severity::Success => icons::circle_check(),
            Severity::Warning => icons::triangle_alert(),
            Severity::Error => icons::circle_cross(),
        }
    }
}

/// One toast: an i18n key plus optional Fluent arguments, resolved at render
/// time so a locale switch retranslates live toasts too.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds a Fluent argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    fn is_expired(&self) -> bool {
        self.severity
            .auto_dismiss_after()
            .is_some_and(|after| self.created_at.elapsed() >= after)
    }

    fn resolve(&self, i18n: &I18n) -> String {
        if self.message_args.is_empty() {
            i18n.tr(&self.message_key)
        } else {
            let args: Vec<(&str, &str)> = self
                .message_args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(&self.message_key, &args)
        }
    }
}

/// Messages for toast interaction and lifecycle.
#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

/// Queue of toasts with a visible cap.
#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queued: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_back(notification);
        } else {
            self.queued.push_back(notification);
        }
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        self.visible.retain(|n| n.id() != id);
        self.queued.retain(|n| n.id() != id);
        self.promote();
    }

    /// Drops expired toasts; call on a periodic tick.
    pub fn tick(&mut self) {
        self.visible.retain(|n| !n.is_expired());
        self.promote();
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.dismiss(*id),
            Message::Tick => self.tick(),
        }
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queued.is_empty()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    fn promote(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queued.pop_front() {
                Some(n) => self.visible.push_back(n),
                None => break,
            }
        }
    }

    /// Renders the bottom-right toast stack. Returns a zero-sized element
    /// when there is nothing to show.
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        if self.visible.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let toasts: Vec<Element<'a, Message>> =
            self.visible.iter().map(|n| toast(n, i18n)).collect();

        let stack = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

fn toast<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
    let accent = notification.severity().color();

    let icon = icons::sized(
        icons::tinted(notification.severity().icon(), accent),
        sizing::ICON_MD,
    );

    let message = Text::new(notification.resolve(i18n))
        .size(typography::BODY)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.palette().text),
        });

    let dismiss = button(icons::sized(icons::cross(), sizing::ICON_SM))
        .on_press(Message::Dismiss(notification.id()))
        .padding(spacing::XXS)
        .style(crate::ui::styles::button::subtle);

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(icon)
        .push(Container::new(message).width(Length::Fill))
        .push(dismiss);

    Container::new(content)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_style(theme, accent))
        .into()
}

fn toast_style(theme: &Theme, accent: Color) -> container::Style {
    let base = theme.extended_palette().background.weak.color;
    container::Style {
        background: Some(Background::Color(base)),
        border: Border {
            color: accent,
            width: 2.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Notification::info("x");
        let b = Notification::info("x");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn push_overflow_goes_to_queue() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE + 2 {
            manager.push(Notification::info(format!("key-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert!(manager.has_notifications());
    }

    #[test]
    fn dismiss_promotes_queued_toast() {
        let mut manager = Manager::new();
        let mut first_id = None;
        for i in 0..MAX_VISIBLE + 1 {
            let n = Notification::info(format!("key-{i}"));
            if i == 0 {
                first_id = Some(n.id());
            }
            manager.push(n);
        }

        manager.dismiss(first_id.unwrap());
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
    }

    #[test]
    fn errors_never_expire_on_tick() {
        let mut manager = Manager::new();
        manager.push(Notification::error("key"));
        manager.tick();
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            Severity::Info.color(),
            Severity::Success.color(),
            Severity::Warning.color(),
            Severity::Error.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn warning_stays_longer_than_info() {
        assert!(
            Severity::Warning.auto_dismiss_after().unwrap()
                > Severity::Info.auto_dismiss_after().unwrap()
        );
    }

    #[test]
    fn builder_collects_args() {
        let n = Notification::warning("bulk-download-failures").with_arg("count", "3");
        assert_eq!(n.message_key(), "bulk-download-failures");
        assert_eq!(n.message_args.len(), 1);
    }
}
