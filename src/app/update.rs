// SPDX-License-Identifier: MPL-2.0
//! The main update loop.
//!
//! Screen updates return events; this module turns those events into side
//! effects: collaborator fetches, downloads, persistence, navigation. All
//! async work runs through `Task` so results come back as messages and only
//! the update loop ever touches state.

use super::{App, Message, Screen};
use crate::download::{self, bulk};
use crate::session::Session;
use crate::ui::gallery::State as GalleryState;
use crate::ui::{dashboard, gallery, login, notifications};
use iced::Task;
use std::path::PathBuf;

/// Routes one top-level message.
pub fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Login(msg) => match app.login.update(msg) {
            login::Event::None => Task::none(),
            login::Event::Submitted(email) => {
                app.session = Some(Session::new(email.clone()));
                app.app_state.session_email = Some(email);
                persist_state(app);
                open_dashboard(app)
            }
        },

        Message::Dashboard(msg) => match app.dashboard.update(msg) {
            dashboard::DashboardEvent::None => Task::none(),
            dashboard::DashboardEvent::RefreshRequested => open_dashboard(app),
            dashboard::DashboardEvent::OpenGallery(event_id) => open_gallery(app, event_id),
            dashboard::DashboardEvent::SignOut => sign_out(app),
        },

        Message::Gallery(msg) => {
            let Some(gallery_state) = app.gallery.as_mut() else {
                return Task::none();
            };
            let event = gallery_state.update(msg);
            handle_gallery_event(app, event)
        }

        Message::Notification(msg) => {
            app.notifications.handle_message(&msg);
            Task::none()
        }

        Message::Tick(_) => {
            app.notifications.tick();
            match app.screen {
                Screen::Dashboard => {
                    let _ = app.dashboard.update(dashboard::Message::SpinnerTick);
                }
                Screen::Gallery => {
                    if let Some(gallery_state) = app.gallery.as_mut() {
                        let _ = gallery_state.update(gallery::Message::SpinnerTick);
                    }
                }
                Screen::Login => {}
            }
            Task::none()
        }
    }
}

fn handle_gallery_event(app: &mut App, event: gallery::GalleryEvent) -> Task<Message> {
    match event {
        gallery::GalleryEvent::None => Task::none(),

        gallery::GalleryEvent::EventMissing => {
            if let Some(gallery_state) = &app.gallery {
                eprintln!(
                    "Event {} not found; returning to the dashboard",
                    gallery_state.event_id()
                );
            }
            app.gallery = None;
            open_dashboard(app)
        }

        gallery::GalleryEvent::FetchThumbnails(urls) => {
            let generation = app.gallery.as_ref().map_or(0, GalleryState::generation);
            let tasks = urls.into_iter().map(|url| {
                let client = app.api.http().clone();
                Task::perform(
                    async move {
                        let result = gallery::fetch_thumbnail(client, url.clone()).await;
                        (url, result)
                    },
                    move |(url, result)| {
                        Message::Gallery(gallery::Message::ThumbnailFetched {
                            generation,
                            url,
                            result,
                        })
                    },
                )
            });
            Task::batch(tasks)
        }

        gallery::GalleryEvent::StartDownload(url) => {
            let client = app.api.http().clone();
            let dir = download_dir(app);
            Task::perform(
                async move { download::save_with_fallback(&client, &url, &dir).await },
                |outcome| Message::Gallery(gallery::Message::DownloadFinished(outcome)),
            )
        }

        gallery::GalleryEvent::StartBulkDownload(urls) => start_bulk_download(app, urls),

        gallery::GalleryEvent::BulkCompleted(report) => {
            if report.has_failures() {
                app.notifications.push(
                    notifications::Notification::warning("bulk-download-failures")
                        .with_arg("count", report.failed.to_string()),
                );
            }
            Task::none()
        }

        gallery::GalleryEvent::Back => {
            app.gallery = None;
            open_dashboard(app)
        }

        gallery::GalleryEvent::SignOut => sign_out(app),
    }
}

/// Switches to the dashboard and starts a fresh event-list fetch.
pub(super) fn open_dashboard(app: &mut App) -> Task<Message> {
    let Some(email) = app.session.as_ref().map(|s| s.email().to_string()) else {
        app.screen = Screen::Login;
        return Task::none();
    };

    app.screen = Screen::Dashboard;
    let generation = app.dashboard.activate();
    let api = app.api.clone();

    Task::perform(dashboard::load(api, email), move |result| {
        Message::Dashboard(dashboard::Message::Loaded { generation, result })
    })
}

/// Starts a fresh gallery activation for `event_id`.
///
/// Without a session this is a redirect to login and nothing is fetched.
pub(super) fn open_gallery(app: &mut App, event_id: String) -> Task<Message> {
    let Some(email) = app.session.as_ref().map(|s| s.email().to_string()) else {
        app.screen = Screen::Login;
        return Task::none();
    };

    app.screen = Screen::Gallery;
    let (gallery_state, generation) = GalleryState::activate(event_id.clone());
    app.gallery = Some(gallery_state);

    app.app_state.last_event_id = Some(event_id.clone());
    persist_state(app);

    let api = app.api.clone();
    Task::perform(gallery::load(api, event_id, email), move |result| {
        Message::Gallery(gallery::Message::Loaded { generation, result })
    })
}

/// Clears the session everywhere and returns to login.
fn sign_out(app: &mut App) -> Task<Message> {
    app.session = None;
    app.gallery = None;
    app.app_state.session_email = None;
    persist_state(app);
    app.screen = Screen::Login;
    Task::none()
}

/// Saves persisted state, surfacing any problem as a warning toast.
fn persist_state(app: &mut App) {
    if let Some(key) = app.app_state.save() {
        app.notifications
            .push(notifications::Notification::warning(key));
    }
}

/// Where downloads land. The temp dir is a last resort for the rare platform
/// where neither a Downloads folder nor a data dir can be resolved.
fn download_dir(app: &App) -> PathBuf {
    app.config.download_dir().unwrap_or_else(std::env::temp_dir)
}

/// Starts the serialized bulk run on the runtime and bridges its progress
/// channel back into the message stream.
fn start_bulk_download(app: &mut App, urls: Vec<String>) -> Task<Message> {
    use iced::futures::channel::{mpsc, oneshot};
    use iced::futures::{stream, StreamExt};

    let total = urls.len();
    app.notifications.push(
        notifications::Notification::info("bulk-download-start")
            .with_arg("count", total.to_string()),
    );

    let client = app.api.http().clone();
    let dir = download_dir(app);

    // Channels for per-item progress and the final report
    let (progress_tx, progress_rx) = mpsc::channel::<bulk::ItemProgress>(100);
    let (result_tx, result_rx) = oneshot::channel::<bulk::Report>();

    tokio::spawn(async move {
        let mut progress_tx = progress_tx;
        let report = bulk::run(
            urls,
            move |url| {
                let client = client.clone();
                let dir = dir.clone();
                async move { download::save_with_fallback(&client, &url, &dir).await }
            },
            move |item| {
                let _ = progress_tx.try_send(item);
            },
        )
        .await;
        // Dropping the progress sender closes the channel; the stream below
        // then waits on the report.
        let _ = result_tx.send(report);
    });

    // State machine for the bridging stream
    #[allow(clippy::items_after_statements)]
    enum BulkPhase {
        ReceivingProgress {
            progress_rx: mpsc::Receiver<bulk::ItemProgress>,
            result_rx: oneshot::Receiver<bulk::Report>,
            last_done: usize,
            total: usize,
        },
        WaitingForReport {
            result_rx: oneshot::Receiver<bulk::Report>,
        },
        Completed,
    }

    let bulk_stream = stream::unfold(
        BulkPhase::ReceivingProgress {
            progress_rx,
            result_rx,
            last_done: 0,
            total,
        },
        |phase| async move {
            match phase {
                BulkPhase::ReceivingProgress {
                    mut progress_rx,
                    result_rx,
                    last_done,
                    total,
                } => match progress_rx.next().await {
                    Some(item) => {
                        let done = item.index + 1;
                        Some((
                            Message::Gallery(gallery::Message::BulkItemFinished {
                                done,
                                total: item.total,
                            }),
                            BulkPhase::ReceivingProgress {
                                progress_rx,
                                result_rx,
                                last_done: done,
                                total: item.total,
                            },
                        ))
                    }
                    None => {
                        // Progress channel closed; repeat the last count and
                        // wait for the report.
                        Some((
                            Message::Gallery(gallery::Message::BulkItemFinished {
                                done: last_done,
                                total,
                            }),
                            BulkPhase::WaitingForReport { result_rx },
                        ))
                    }
                },
                BulkPhase::WaitingForReport { result_rx } => {
                    let report = result_rx.await.unwrap_or_default();
                    Some((
                        Message::Gallery(gallery::Message::BulkFinished(report)),
                        BulkPhase::Completed,
                    ))
                }
                BulkPhase::Completed => None, // Terminate the stream
            }
        },
    );

    Task::stream(bulk_stream)
}
