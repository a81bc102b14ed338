// SPDX-License-Identifier: MPL-2.0
//! Cross-module integration tests: config, i18n, persisted session state,
//! and the record-to-gallery derivation working together.

use eventlens::api::{matched_images_for_event, AttendeeImageRecord, Event};
use eventlens::app::config::{self, Config};
use eventlens::app::persisted_state::AppState;
use eventlens::i18n::fluent::I18n;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to fr
    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_locales_share_message_keys() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    let i18n_fr = I18n::new(None, &config);

    // The empty-state title must exist in every shipped locale.
    let fr = i18n_fr.tr("gallery-empty-title");
    assert!(!fr.starts_with("MISSING:"), "fr is missing a key: {fr}");

    let i18n_en = I18n::new(Some("en-US".to_string()), &config);
    let en = i18n_en.tr("gallery-empty-title");
    assert_eq!(en, "No photos found for this event");
}

#[test]
fn test_session_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let base = dir.path().to_path_buf();

    // First run: the user signs in.
    let mut state = AppState::default();
    state.session_email = Some("ada@example.com".to_string());
    state.last_event_id = Some("ev1".to_string());
    assert!(state.save_to(Some(base.clone())).is_none());

    // Second run: the session is restored from disk.
    let (restored, warning) = AppState::load_from(Some(base));
    assert!(warning.is_none());
    assert_eq!(restored.session_email.as_deref(), Some("ada@example.com"));
    assert_eq!(restored.last_event_id.as_deref(), Some("ev1"));
}

#[test]
fn test_spring_gala_scenario() {
    // The reference scenario: one event, one record, two matched photos.
    let event = Event {
        id: "ev1".to_string(),
        name: "Spring Gala".to_string(),
        date: "2024-05-01".to_string(),
    };
    let records: Vec<AttendeeImageRecord> = serde_json::from_str(
        r#"[{
            "eventId": "ev1",
            "uploadedAt": "2024-05-01",
            "matchedImages": ["https://x/a.jpg", "https://x/b.jpg"]
        }]"#,
    )
    .expect("valid records JSON");

    let images = matched_images_for_event(&event, &records);
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].image_id, "a.jpg");
    assert_eq!(images[1].image_id, "b.jpg");
    assert!(images.iter().all(|img| img.event_name == "Spring Gala"));
}

#[test]
fn test_config_download_directory_feeds_downloads() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.downloads.directory = Some(dir.path().join("photos"));
    config::save_to_path(&config, &path).expect("save config");

    let loaded = config::load_from_path(&path).expect("load config");
    assert_eq!(loaded.download_dir(), Some(dir.path().join("photos")));
}
