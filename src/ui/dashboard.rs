// SPDX-License-Identifier: MPL-2.0
//! Dashboard screen: the attendee's events.
//!
//! Groups the attendee's matched-image records by event, resolves each
//! event's metadata, and lets the user open a gallery. Uses the same tagged
//! load state and generation guard as the gallery so a stale fetch can never
//! clobber a newer one.

use crate::api::{ApiClient, AttendeeImageRecord, Event as ApiEvent};
use crate::i18n::fluent::I18n;
use crate::ui::dates::format_event_date;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::widgets::spinner::{self, Spinner};
use crate::ui::{icons, styles};
use iced::widget::{button, scrollable, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};

/// One event card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub event: ApiEvent,
    pub photo_count: usize,
}

/// Load state for the event list.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(Vec<EventSummary>),
    Failed,
}

/// Dashboard screen state.
#[derive(Debug, Default)]
pub struct State {
    generation: u64,
    load: LoadState,
    spinner_rotation: f32,
}

/// Messages emitted by the dashboard.
#[derive(Debug, Clone)]
pub enum Message {
    /// An event-list fetch finished; stale generations are dropped.
    Loaded {
        generation: u64,
        result: Result<Vec<EventSummary>, String>,
    },
    Refresh,
    OpenEvent(String),
    SignOut,
    SpinnerTick,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    None,
    /// Start a fresh fetch for the current attendee.
    RefreshRequested,
    OpenGallery(String),
    SignOut,
}

impl State {
    /// Begins a new activation and returns its generation, which the
    /// completion message must echo back.
    pub fn activate(&mut self) -> u64 {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.spinner_rotation = 0.0;
        self.generation
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    /// Process a dashboard message and return the corresponding event.
    pub fn update(&mut self, message: Message) -> DashboardEvent {
        match message {
            Message::Loaded { generation, result } => {
                if generation != self.generation {
                    // A newer activation superseded this fetch.
                    return DashboardEvent::None;
                }
                self.load = match result {
                    Ok(events) => LoadState::Loaded(events),
                    Err(reason) => {
                        eprintln!("Failed to load events: {reason}");
                        LoadState::Failed
                    }
                };
                DashboardEvent::None
            }
            Message::Refresh => DashboardEvent::RefreshRequested,
            Message::OpenEvent(id) => DashboardEvent::OpenGallery(id),
            Message::SignOut => DashboardEvent::SignOut,
            Message::SpinnerTick => {
                if self.is_loading() {
                    self.spinner_rotation = spinner::advance(self.spinner_rotation);
                }
                DashboardEvent::None
            }
        }
    }

    /// Render the dashboard.
    pub fn view<'a>(&'a self, i18n: &'a I18n, email: &'a str) -> Element<'a, Message> {
        let header = header(i18n, email);

        let body: Element<'a, Message> = match &self.load {
            LoadState::Loading => loading(i18n, self.spinner_rotation),
            LoadState::Loaded(events) if events.is_empty() => empty(i18n),
            // The source behavior renders a failed fetch like an empty list;
            // the variant stays distinct in state.
            LoadState::Failed => empty(i18n),
            LoadState::Loaded(events) => event_list(i18n, events),
        };

        Column::new()
            .push(header)
            .push(Container::new(body).width(Length::Fill).height(Length::Fill))
            .into()
    }
}

fn header<'a>(i18n: &'a I18n, email: &'a str) -> Element<'a, Message> {
    let title = Text::new(i18n.tr("dashboard-title")).size(typography::TITLE_MD);

    let signed_in = Text::new(i18n.tr_with_args("dashboard-signed-in-as", &[("email", email)]))
        .size(typography::CAPTION)
        .style(|theme: &Theme| iced::widget::text::Style {
            color: Some(theme.extended_palette().background.strong.color),
        });

    let refresh = button(
        Row::new()
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center)
            .push(icons::sized(icons::arrows_cycle(), sizing::ICON_SM))
            .push(Text::new(i18n.tr("dashboard-refresh")).size(typography::BODY)),
    )
    .on_press(Message::Refresh)
    .padding([spacing::XXS, spacing::XS])
    .style(styles::button::subtle);

    let sign_out = button(
        Row::new()
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center)
            .push(icons::sized(icons::door_exit(), sizing::ICON_SM))
            .push(Text::new(i18n.tr("dashboard-sign-out")).size(typography::BODY)),
    )
    .on_press(Message::SignOut)
    .padding([spacing::XXS, spacing::XS])
    .style(styles::button::subtle);

    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(title)
            .push(Container::new(signed_in).width(Length::Fill))
            .push(refresh)
            .push(sign_out),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .into()
}

fn loading<'a>(i18n: &'a I18n, rotation: f32) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Spinner::new(palette::PRIMARY_500, rotation).into_element())
        .push(Text::new(i18n.tr("dashboard-loading")).size(typography::BODY));

    centered(content.into())
}

fn empty<'a>(i18n: &'a I18n) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(icons::sized(icons::calendar(), sizing::ICON_XL))
        .push(Text::new(i18n.tr("dashboard-empty-title")).size(typography::TITLE_SM))
        .push(
            Text::new(i18n.tr("dashboard-empty-subtitle"))
                .size(typography::BODY)
                .style(|theme: &Theme| iced::widget::text::Style {
                    color: Some(theme.extended_palette().background.strong.color),
                }),
        );

    centered(content.into())
}

fn event_list<'a>(i18n: &'a I18n, events: &'a [EventSummary]) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> =
        events.iter().map(|summary| event_card(i18n, summary)).collect();

    scrollable(
        Column::with_children(cards)
            .spacing(spacing::SM)
            .padding(spacing::MD)
            .width(Length::Fill),
    )
    .into()
}

fn event_card<'a>(i18n: &'a I18n, summary: &'a EventSummary) -> Element<'a, Message> {
    let count = summary.photo_count.to_string();

    let details = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(summary.event.name.as_str()).size(typography::TITLE_SM))
        .push(
            Row::new()
                .spacing(spacing::XXS)
                .align_y(alignment::Vertical::Center)
                .push(icons::sized(icons::calendar(), sizing::ICON_SM))
                .push(
                    Text::new(format_event_date(&summary.event.date, i18n))
                        .size(typography::CAPTION),
                ),
        )
        .push(
            Text::new(i18n.tr_with_args("dashboard-photo-count", &[("count", &count)]))
                .size(typography::CAPTION)
                .style(|theme: &Theme| iced::widget::text::Style {
                    color: Some(theme.extended_palette().background.strong.color),
                }),
        );

    let open = button(Text::new(i18n.tr("dashboard-open-event")).size(typography::BODY))
        .on_press(Message::OpenEvent(summary.event.id.clone()))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);

    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(details).width(Length::Fill))
            .push(open),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

/// Groups records by event id in first-seen order, counting matched images.
#[must_use]
pub fn count_by_event(records: &[AttendeeImageRecord]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for record in records {
        if !counts.contains_key(record.event_id.as_str()) {
            order.push(record.event_id.clone());
        }
        *counts.entry(record.event_id.as_str()).or_insert(0) += record.matched_images.len();
    }

    order
        .into_iter()
        .map(|id| {
            let count = counts.get(id.as_str()).copied().unwrap_or(0);
            (id, count)
        })
        .collect()
}

/// Fetches the attendee's records and resolves each distinct event.
/// Events the service no longer knows are skipped.
pub async fn load(api: ApiClient, email: String) -> Result<Vec<EventSummary>, String> {
    let records = api
        .attendee_images(&email)
        .await
        .map_err(|e| e.to_string())?;

    let mut summaries = Vec::new();
    for (event_id, photo_count) in count_by_event(&records) {
        match api.event_by_id(&event_id).await {
            Ok(Some(event)) => summaries.push(EventSummary { event, photo_count }),
            Ok(None) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(summaries)
}
