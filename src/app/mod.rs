// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together the screens (login, dashboard, gallery),
//! localization, and persisted session state, and translates screen events
//! into side effects like collaborator fetches or downloads. This file
//! intentionally keeps policy decisions (where redirects land, what gets
//! persisted when) close to the main update loop so user-facing behavior is
//! easy to audit.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::ApiClient;
use crate::i18n::fluent::I18n;
use crate::session::Session;
use crate::ui::theming::ThemeMode;
use crate::ui::{dashboard, gallery, login, notifications};
use iced::{window, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 500;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Root Iced application state bridging screens, localization, and persisted
/// session state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    /// Signed-in attendee; `None` keeps the app on the login screen.
    session: Option<Session>,
    login: login::State,
    dashboard: dashboard::State,
    /// One gallery activation at a time; replaced wholesale when another
    /// event opens.
    gallery: Option<gallery::State>,
    notifications: notifications::Manager,
    config: config::Config,
    app_state: persisted_state::AppState,
    api: ApiClient,
    theme_mode: ThemeMode,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("signed_in", &self.session.is_some())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and routes the first screen: a stored
    /// session lands on the dashboard (or straight into a gallery when the
    /// CLI named an event), no session lands on login with nothing fetched.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir, flags.config_dir);

        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);

        let base_url = flags
            .api_url
            .unwrap_or_else(|| config.api_base_url().to_string());
        let api = ApiClient::new(base_url).expect("HTTP client initialization failed");

        let (app_state, state_warning) = persisted_state::AppState::load();
        let session = app_state.session_email.clone().map(Session::new);

        let mut app = App {
            i18n,
            screen: Screen::Login,
            session,
            login: login::State::new(),
            dashboard: dashboard::State::default(),
            gallery: None,
            notifications: notifications::Manager::new(),
            theme_mode: config.general.theme_mode,
            config,
            app_state,
            api,
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }
        if let Some(key) = state_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = if app.session.is_some() {
            match flags.event_id {
                Some(event_id) => update::open_gallery(&mut app, event_id),
                None => update::open_dashboard(&mut app),
            }
        } else {
            // Signed out: no collaborator calls until a session exists.
            Task::none()
        };

        (app, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle(self, message)
    }

    fn view(&self) -> iced::Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("app-title");
        match self
            .gallery
            .as_ref()
            .filter(|_| self.screen == Screen::Gallery)
            .and_then(gallery::State::event_name)
        {
            Some(event_name) => format!("{event_name} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }
}
