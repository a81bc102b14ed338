// SPDX-License-Identifier: MPL-2.0
//! Photo grid for the gallery screen.

use super::Message;
use crate::api::MatchedImage;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{icons, styles};
use iced::widget::image::Handle;
use iced::widget::{button, scrollable, tooltip, Column, Container, Image, Row, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};
use std::collections::HashMap;

/// Photos per grid row.
const COLUMNS: usize = 3;

/// Renders the grid in display order: chunks of [`COLUMNS`] cards inside a
/// scrollable column.
pub fn view<'a>(
    images: &'a [MatchedImage],
    thumbnails: &'a HashMap<String, Handle>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = images
        .chunks(COLUMNS)
        .enumerate()
        .map(|(row_index, chunk)| {
            let cards = chunk.iter().enumerate().map(|(column_index, image)| {
                card(image, row_index * COLUMNS + column_index, thumbnails, i18n)
            });
            Row::with_children(cards.collect::<Vec<_>>())
                .spacing(spacing::SM)
                .into()
        })
        .collect();

    scrollable(
        Column::with_children(rows)
            .spacing(spacing::SM)
            .padding(spacing::MD)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .into()
}

fn card<'a>(
    image: &'a MatchedImage,
    index: usize,
    thumbnails: &'a HashMap<String, Handle>,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let thumbnail: Element<'a, Message> = match thumbnails.get(&image.image_url) {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fixed(sizing::PHOTO_THUMBNAIL))
            .height(Length::Fixed(sizing::PHOTO_THUMBNAIL))
            .content_fit(ContentFit::Cover)
            .into(),
        // Bytes not here yet (or the fetch failed): placeholder card.
        None => Container::new(icons::sized(icons::picture(), sizing::ICON_XL))
            .width(Length::Fixed(sizing::PHOTO_THUMBNAIL))
            .height(Length::Fixed(sizing::PHOTO_THUMBNAIL))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let label = Text::new(image.image_id.as_str())
        .size(typography::CAPTION)
        .style(|theme: &Theme| iced::widget::text::Style {
            color: Some(theme.extended_palette().background.strong.color),
        });

    let download = tooltip(
        button(icons::sized(
            icons::tinted(icons::arrow_down_tray(), palette::PRIMARY_600),
            sizing::ICON_MD,
        ))
        .on_press(Message::DownloadPhoto(index))
        .padding(spacing::XXS)
        .style(styles::button::card_icon),
        Text::new(i18n.tr("gallery-download")).size(typography::CAPTION),
        tooltip::Position::Top,
    );

    let footer = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(Container::new(label).width(Length::Fill))
        .push(download);

    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .push(thumbnail)
            .push(footer),
    )
    .padding(spacing::XS)
    .width(Length::Fixed(sizing::PHOTO_CELL))
    .style(styles::container::photo_card)
    .into()
}
