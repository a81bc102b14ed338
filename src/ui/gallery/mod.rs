// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: an event's matched photos.
//!
//! One `State` is one activation. Opening another event builds a fresh state
//! with a new generation; completions from a superseded activation carry the
//! old generation and are dropped on arrival, so they can never race into
//! current state.
//!
//! Load state is a tagged variant. A fetch failure renders the same empty
//! surface as a legitimately empty gallery, but `Failed` stays
//! distinguishable from `Loaded([])` in state.

mod empty_state;
mod grid;

use crate::api::{matched_images_for_event, ApiClient, Event as ApiEvent, MatchedImage};
use crate::download::{bulk, Outcome};
use crate::i18n::fluent::I18n;
use crate::ui::dates::format_event_date;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::widgets::spinner::{self, Spinner};
use crate::ui::{icons, styles};
use iced::widget::{button, image, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};
use std::collections::HashMap;

/// Monotonic across all gallery activations, so a message from a discarded
/// instance can never match a live one.
fn next_generation() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed) + 1
}

/// Result of the activation fetch sequence.
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// The service does not know the event id.
    EventMissing,
    Loaded {
        event: ApiEvent,
        images: Vec<MatchedImage>,
    },
    /// Event lookup or record fetch failed.
    FetchFailed(String),
}

/// Tagged load state; never a boolean plus a list.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded {
        event: ApiEvent,
        images: Vec<MatchedImage>,
    },
    Failed,
}

/// Progress of an in-flight bulk download.
#[derive(Debug, Clone, Copy)]
struct BulkProgress {
    done: usize,
    total: usize,
}

/// Gallery screen state for a single activation.
#[derive(Debug)]
pub struct State {
    event_id: String,
    generation: u64,
    load: LoadState,
    /// Fetched thumbnail handles, keyed by image URL. Purely cosmetic: a
    /// missing entry renders as a placeholder card.
    thumbnails: HashMap<String, image::Handle>,
    spinner_rotation: f32,
    bulk: Option<BulkProgress>,
}

/// Messages emitted by the gallery.
#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        generation: u64,
        result: LoadResult,
    },
    ThumbnailFetched {
        generation: u64,
        url: String,
        result: Result<Vec<u8>, String>,
    },
    DownloadPhoto(usize),
    /// A single, user-initiated download concluded.
    DownloadFinished(Outcome),
    DownloadAll,
    BulkItemFinished {
        done: usize,
        total: usize,
    },
    BulkFinished(bulk::Report),
    SpinnerTick,
    Back,
    SignOut,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum GalleryEvent {
    None,
    /// The event id resolved to nothing; the app logs and redirects.
    EventMissing,
    /// Fetch thumbnails for these URLs.
    FetchThumbnails(Vec<String>),
    /// Download one photo.
    StartDownload(String),
    /// Start the serialized bulk download over these URLs.
    StartBulkDownload(Vec<String>),
    /// Bulk run finished; the app may show the aggregate warning.
    BulkCompleted(bulk::Report),
    Back,
    SignOut,
}

impl State {
    /// Creates a fresh activation for `event_id` and returns its generation.
    #[must_use]
    pub fn activate(event_id: impl Into<String>) -> (Self, u64) {
        let generation = next_generation();
        (
            Self {
                event_id: event_id.into(),
                generation,
                load: LoadState::Loading,
                thumbnails: HashMap::new(),
                spinner_rotation: 0.0,
                bulk: None,
            },
            generation,
        )
    }

    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The loaded event's display name, once known.
    #[must_use]
    pub fn event_name(&self) -> Option<&str> {
        match &self.load {
            LoadState::Loaded { event, .. } => Some(event.name.as_str()),
            LoadState::Loading | LoadState::Failed => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    #[must_use]
    pub fn is_bulk_downloading(&self) -> bool {
        self.bulk.is_some()
    }

    fn images(&self) -> &[MatchedImage] {
        match &self.load {
            LoadState::Loaded { images, .. } => images,
            LoadState::Loading | LoadState::Failed => &[],
        }
    }

    /// Process a gallery message and return the corresponding event.
    pub fn update(&mut self, message: Message) -> GalleryEvent {
        match message {
            Message::Loaded { generation, result } => {
                if generation != self.generation {
                    // Completion of a superseded activation.
                    return GalleryEvent::None;
                }
                match result {
                    LoadResult::EventMissing => GalleryEvent::EventMissing,
                    LoadResult::Loaded { event, images } => {
                        let urls: Vec<String> =
                            images.iter().map(|img| img.image_url.clone()).collect();
                        self.load = LoadState::Loaded { event, images };
                        GalleryEvent::FetchThumbnails(urls)
                    }
                    LoadResult::FetchFailed(reason) => {
                        eprintln!("Failed to load gallery: {reason}");
                        self.load = LoadState::Failed;
                        GalleryEvent::None
                    }
                }
            }
            Message::ThumbnailFetched {
                generation,
                url,
                result,
            } => {
                if generation == self.generation {
                    match result {
                        Ok(bytes) => {
                            self.thumbnails.insert(url, image::Handle::from_bytes(bytes));
                        }
                        Err(reason) => {
                            eprintln!("Thumbnail fetch failed for {url}: {reason}");
                        }
                    }
                }
                GalleryEvent::None
            }
            Message::DownloadPhoto(index) => match self.images().get(index) {
                Some(image) => GalleryEvent::StartDownload(image.image_url.clone()),
                None => GalleryEvent::None,
            },
            // The single-download path already degraded to a browser open on
            // failure; nothing to surface here.
            Message::DownloadFinished(_outcome) => GalleryEvent::None,
            Message::DownloadAll => {
                let urls: Vec<String> = self
                    .images()
                    .iter()
                    .map(|img| img.image_url.clone())
                    .collect();
                if urls.is_empty() || self.bulk.is_some() {
                    return GalleryEvent::None;
                }
                self.bulk = Some(BulkProgress {
                    done: 0,
                    total: urls.len(),
                });
                GalleryEvent::StartBulkDownload(urls)
            }
            Message::BulkItemFinished { done, total } => {
                self.bulk = Some(BulkProgress { done, total });
                GalleryEvent::None
            }
            Message::BulkFinished(report) => {
                self.bulk = None;
                GalleryEvent::BulkCompleted(report)
            }
            Message::SpinnerTick => {
                if self.is_loading() {
                    self.spinner_rotation = spinner::advance(self.spinner_rotation);
                }
                GalleryEvent::None
            }
            Message::Back => GalleryEvent::Back,
            Message::SignOut => GalleryEvent::SignOut,
        }
    }

    /// Render the gallery.
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let body: Element<'a, Message> = match &self.load {
            LoadState::Loading => self.loading(i18n),
            LoadState::Loaded { images, .. } if images.is_empty() => empty_state::view(i18n),
            LoadState::Failed => empty_state::view(i18n),
            LoadState::Loaded { images, .. } => grid::view(images, &self.thumbnails, i18n),
        };

        Column::new()
            .push(self.header(i18n))
            .push(Container::new(body).width(Length::Fill).height(Length::Fill))
            .into()
    }

    fn header<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let back = button(
            Row::new()
                .spacing(spacing::XXS)
                .align_y(alignment::Vertical::Center)
                .push(icons::sized(icons::chevron_left(), sizing::ICON_SM))
                .push(Text::new(i18n.tr("gallery-back")).size(typography::BODY)),
        )
        .on_press(Message::Back)
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::subtle);

        let heading: Element<'a, Message> = match &self.load {
            LoadState::Loaded { event, .. } => Column::new()
                .spacing(spacing::XXS)
                .push(Text::new(event.name.as_str()).size(typography::TITLE_MD))
                .push(
                    Text::new(format_event_date(&event.date, i18n))
                        .size(typography::CAPTION)
                        .style(|theme: &Theme| iced::widget::text::Style {
                            color: Some(theme.extended_palette().background.strong.color),
                        }),
                )
                .into(),
            LoadState::Loading | LoadState::Failed => {
                Text::new(i18n.tr("app-title")).size(typography::TITLE_MD).into()
            }
        };

        let mut actions = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center);

        if let Some(progress) = self.bulk {
            let done = progress.done.to_string();
            let total = progress.total.to_string();
            actions = actions.push(
                Text::new(i18n.tr_with_args(
                    "gallery-bulk-progress",
                    &[("done", &done), ("total", &total)],
                ))
                .size(typography::BODY),
            );
        }

        // "Download All" only exists when there is something to download.
        if !self.images().is_empty() {
            let label = Row::new()
                .spacing(spacing::XXS)
                .align_y(alignment::Vertical::Center)
                .push(icons::sized(
                    icons::tinted(icons::arrow_down_tray(), palette::WHITE),
                    sizing::ICON_SM,
                ))
                .push(Text::new(i18n.tr("gallery-download-all")).size(typography::BODY));

            actions = actions.push(
                button(label)
                    .on_press_maybe(self.bulk.is_none().then_some(Message::DownloadAll))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::primary),
            );
        }

        let sign_out = button(icons::sized(icons::door_exit(), sizing::ICON_SM))
            .on_press(Message::SignOut)
            .padding(spacing::XXS)
            .style(styles::button::subtle);

        Container::new(
            Row::new()
                .spacing(spacing::MD)
                .align_y(alignment::Vertical::Center)
                .push(back)
                .push(Container::new(heading).width(Length::Fill))
                .push(actions)
                .push(sign_out),
        )
        .width(Length::Fill)
        .padding(spacing::MD)
        .into()
    }

    fn loading<'a>(&self, i18n: &'a I18n) -> Element<'a, Message> {
        let content = Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(Spinner::new(palette::PRIMARY_500, self.spinner_rotation).into_element())
            .push(Text::new(i18n.tr("gallery-loading")).size(typography::BODY));

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }
}

/// The activation fetch sequence: event first, records second.
///
/// An unknown event returns [`LoadResult::EventMissing`] before any image
/// fetch is issued; a transport or decode failure on either call returns
/// [`LoadResult::FetchFailed`].
pub async fn load(api: ApiClient, event_id: String, email: String) -> LoadResult {
    let event = match api.event_by_id(&event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return LoadResult::EventMissing,
        Err(e) => return LoadResult::FetchFailed(e.to_string()),
    };

    match api.attendee_images(&email).await {
        Ok(records) => {
            let images = matched_images_for_event(&event, &records);
            LoadResult::Loaded { event, images }
        }
        Err(e) => LoadResult::FetchFailed(e.to_string()),
    }
}

/// Fetches one thumbnail's bytes for in-grid display.
pub async fn fetch_thumbnail(client: reqwest::Client, url: String) -> Result<Vec<u8>, String> {
    let response = client.get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("status {}", response.status()));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring_gala() -> ApiEvent {
        ApiEvent {
            id: "ev1".to_string(),
            name: "Spring Gala".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    fn loaded_result(urls: &[&str]) -> LoadResult {
        let event = spring_gala();
        let images = urls
            .iter()
            .map(|url| MatchedImage {
                image_id: crate::api::image_id_from_url(url),
                event_id: event.id.clone(),
                event_name: event.name.clone(),
                image_url: (*url).to_string(),
                matched_date: "2024-05-01".to_string(),
            })
            .collect();
        LoadResult::Loaded { event, images }
    }

    #[test]
    fn generations_are_monotonic_across_activations() {
        let (_, first) = State::activate("ev1");
        let (_, second) = State::activate("ev1");
        assert!(second > first);
    }

    #[test]
    fn loaded_result_requests_thumbnails() {
        let (mut state, generation) = State::activate("ev1");
        let event = state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg", "https://x/b.jpg"]),
        });

        match event {
            GalleryEvent::FetchThumbnails(urls) => {
                assert_eq!(urls, vec!["https://x/a.jpg", "https://x/b.jpg"]);
            }
            other => panic!("expected FetchThumbnails, got {other:?}"),
        }
        assert!(!state.is_loading());
        assert_eq!(state.images().len(), 2);
        assert_eq!(state.images()[0].image_id, "a.jpg");
        assert_eq!(state.images()[1].image_id, "b.jpg");
        assert!(state.images().iter().all(|i| i.event_name == "Spring Gala"));
    }

    #[test]
    fn stale_loaded_result_is_dropped() {
        // An older activation's completion arrives after a newer activation
        // replaced it.
        let (_superseded, stale_generation) = State::activate("ev1");
        let (mut state, _) = State::activate("ev1");

        let event = state.update(Message::Loaded {
            generation: stale_generation,
            result: loaded_result(&["https://x/a.jpg"]),
        });
        assert!(matches!(event, GalleryEvent::None));
        assert!(state.is_loading());
    }

    #[test]
    fn missing_event_redirects() {
        let (mut state, generation) = State::activate("ev1");
        let event = state.update(Message::Loaded {
            generation,
            result: LoadResult::EventMissing,
        });
        assert!(matches!(event, GalleryEvent::EventMissing));
    }

    #[test]
    fn fetch_failure_settles_into_failed_without_event() {
        let (mut state, generation) = State::activate("ev1");
        let event = state.update(Message::Loaded {
            generation,
            result: LoadResult::FetchFailed("connection reset".to_string()),
        });
        assert!(matches!(event, GalleryEvent::None));
        assert!(matches!(state.load, LoadState::Failed));
        assert!(state.images().is_empty());
    }

    #[test]
    fn download_photo_resolves_url_by_index() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg", "https://x/b.jpg"]),
        });

        match state.update(Message::DownloadPhoto(1)) {
            GalleryEvent::StartDownload(url) => assert_eq!(url, "https://x/b.jpg"),
            other => panic!("expected StartDownload, got {other:?}"),
        }
    }

    #[test]
    fn download_photo_out_of_range_is_ignored() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg"]),
        });
        assert!(matches!(
            state.update(Message::DownloadPhoto(7)),
            GalleryEvent::None
        ));
    }

    #[test]
    fn download_all_starts_bulk_in_display_order() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg", "https://x/b.jpg"]),
        });

        match state.update(Message::DownloadAll) {
            GalleryEvent::StartBulkDownload(urls) => {
                assert_eq!(urls, vec!["https://x/a.jpg", "https://x/b.jpg"]);
            }
            other => panic!("expected StartBulkDownload, got {other:?}"),
        }
        assert!(state.is_bulk_downloading());
    }

    #[test]
    fn download_all_with_empty_gallery_does_nothing() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&[]),
        });
        assert!(matches!(
            state.update(Message::DownloadAll),
            GalleryEvent::None
        ));
        assert!(!state.is_bulk_downloading());
    }

    #[test]
    fn download_all_is_not_reentrant_while_running() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg"]),
        });

        assert!(matches!(
            state.update(Message::DownloadAll),
            GalleryEvent::StartBulkDownload(_)
        ));
        assert!(matches!(
            state.update(Message::DownloadAll),
            GalleryEvent::None
        ));
    }

    #[test]
    fn bulk_finish_clears_progress_and_reports() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg"]),
        });
        state.update(Message::DownloadAll);
        state.update(Message::BulkItemFinished { done: 1, total: 1 });

        let report = bulk::Report {
            attempted: 1,
            failed: 1,
        };
        match state.update(Message::BulkFinished(report)) {
            GalleryEvent::BulkCompleted(r) => assert_eq!(r, report),
            other => panic!("expected BulkCompleted, got {other:?}"),
        }
        assert!(!state.is_bulk_downloading());
    }

    #[test]
    fn stale_thumbnail_is_dropped() {
        let (mut state, generation) = State::activate("ev1");
        state.update(Message::Loaded {
            generation,
            result: loaded_result(&["https://x/a.jpg"]),
        });

        state.update(Message::ThumbnailFetched {
            generation: generation + 1000,
            url: "https://x/a.jpg".to_string(),
            result: Ok(vec![0xFF, 0xD8]),
        });
        assert!(state.thumbnails.is_empty());

        state.update(Message::ThumbnailFetched {
            generation,
            url: "https://x/a.jpg".to_string(),
            result: Ok(vec![0xFF, 0xD8]),
        });
        assert_eq!(state.thumbnails.len(), 1);
    }
}
