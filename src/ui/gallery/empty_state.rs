// SPDX-License-Identifier: MPL-2.0
//! Empty state shown when an event has no matched photos.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons;
use iced::widget::{Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Renders the "No photos found for this event" panel.
///
/// Also used when the initial fetch failed: the surface is identical to the
/// empty case by design, only the state variant differs.
pub fn view(i18n: &I18n) -> Element<'_, Message> {
    let icon = icons::sized(icons::picture(), sizing::ICON_XL);

    let title = Text::new(i18n.tr("gallery-empty-title")).size(typography::TITLE_SM);

    let subtitle = Text::new(i18n.tr("gallery-empty-subtitle"))
        .size(typography::BODY)
        .style(|theme: &Theme| iced::widget::text::Style {
            color: Some(theme.extended_palette().background.strong.color),
        });

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(icon)
        .push(title)
        .push(subtitle);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
