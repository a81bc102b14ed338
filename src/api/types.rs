// SPDX-License-Identifier: MPL-2.0
//! Wire types for the event-photography service and the derived gallery model.
//!
//! The service speaks camelCase JSON. [`Event`] and [`AttendeeImageRecord`]
//! mirror its payloads verbatim; [`MatchedImage`] is never sent over the wire
//! and is recomputed from scratch on every gallery activation by
//! [`matched_images_for_event`].

use serde::{Deserialize, Serialize};

/// An event as returned by `GET /events/{id}`.
///
/// Immutable snapshot for the lifetime of a gallery activation. `date` is the
/// service's ISO date string and is only interpreted at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
}

/// One matched-image record from `GET /attendees/{email}/images`.
///
/// The matching process emits one record per event per upload batch; a record
/// carries the URLs of every photo matched to the attendee in that batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeImageRecord {
    pub event_id: String,
    pub uploaded_at: String,
    #[serde(default)]
    pub matched_images: Vec<String>,
}

/// A single photo in the gallery, derived from an attendee record.
///
/// Invariant: `event_id` always equals the id of the activation that produced
/// it: records for other events never contribute entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedImage {
    /// Trailing path segment of `image_url`; empty when the URL has none.
    pub image_id: String,
    pub event_id: String,
    pub event_name: String,
    pub image_url: String,
    /// Upload timestamp inherited from the source record.
    pub matched_date: String,
}

/// Derives the image id from a URL: the trailing path segment, with any
/// query string or fragment stripped. A URL ending in `/` derives the empty
/// string.
#[must_use]
pub fn image_id_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    without_query
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Filters `records` to the active event and flattens their URL lists into
/// [`MatchedImage`] entries, preserving source-record order.
///
/// No dedup and no sorting: the gallery shows exactly what the matching
/// process recorded, in the order it recorded it.
#[must_use]
pub fn matched_images_for_event(
    event: &Event,
    records: &[AttendeeImageRecord],
) -> Vec<MatchedImage> {
    records
        .iter()
        .filter(|record| record.event_id == event.id)
        .flat_map(|record| {
            record.matched_images.iter().map(|url| MatchedImage {
                image_id: image_id_from_url(url),
                event_id: record.event_id.clone(),
                event_name: event.name.clone(),
                image_url: url.clone(),
                matched_date: record.uploaded_at.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring_gala() -> Event {
        Event {
            id: "ev1".to_string(),
            name: "Spring Gala".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn image_id_is_trailing_path_segment() {
        assert_eq!(image_id_from_url("https://x/a.jpg"), "a.jpg");
        assert_eq!(image_id_from_url("https://cdn.example.com/ev1/b.png"), "b.png");
    }

    #[test]
    fn image_id_of_trailing_slash_is_empty() {
        assert_eq!(image_id_from_url("https://x/"), "");
    }

    #[test]
    fn image_id_strips_query_and_fragment() {
        assert_eq!(
            image_id_from_url("https://x/a.jpg?token=abc&expires=1"),
            "a.jpg"
        );
        assert_eq!(image_id_from_url("https://x/a.jpg#section"), "a.jpg");
    }

    #[test]
    fn records_for_other_events_are_excluded() {
        let records = vec![
            AttendeeImageRecord {
                event_id: "ev1".to_string(),
                uploaded_at: "2024-05-01".to_string(),
                matched_images: vec!["https://x/a.jpg".to_string()],
            },
            AttendeeImageRecord {
                event_id: "ev2".to_string(),
                uploaded_at: "2024-06-01".to_string(),
                matched_images: vec!["https://x/other.jpg".to_string()],
            },
        ];

        let images = matched_images_for_event(&spring_gala(), &records);
        assert_eq!(images.len(), 1);
        assert!(images.iter().all(|img| img.event_id == "ev1"));
    }

    #[test]
    fn single_record_flattens_in_order_with_event_name() {
        let records = vec![AttendeeImageRecord {
            event_id: "ev1".to_string(),
            uploaded_at: "2024-05-01".to_string(),
            matched_images: vec![
                "https://x/a.jpg".to_string(),
                "https://x/b.jpg".to_string(),
            ],
        }];

        let images = matched_images_for_event(&spring_gala(), &records);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].image_id, "a.jpg");
        assert_eq!(images[1].image_id, "b.jpg");
        assert!(images.iter().all(|img| img.event_name == "Spring Gala"));
        assert!(images.iter().all(|img| img.matched_date == "2024-05-01"));
    }

    #[test]
    fn duplicate_urls_are_kept() {
        let records = vec![AttendeeImageRecord {
            event_id: "ev1".to_string(),
            uploaded_at: "2024-05-01".to_string(),
            matched_images: vec![
                "https://x/a.jpg".to_string(),
                "https://x/a.jpg".to_string(),
            ],
        }];

        // No dedup invariant: the gallery mirrors the records as-is.
        let images = matched_images_for_event(&spring_gala(), &records);
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn no_matching_records_derives_empty_list() {
        let records = vec![AttendeeImageRecord {
            event_id: "ev9".to_string(),
            uploaded_at: "2024-01-01".to_string(),
            matched_images: vec!["https://x/a.jpg".to_string()],
        }];

        assert!(matched_images_for_event(&spring_gala(), &records).is_empty());
    }

    #[test]
    fn event_deserializes_from_camel_case() {
        let event: Event =
            serde_json::from_str(r#"{"id":"ev1","name":"Spring Gala","date":"2024-05-01"}"#)
                .expect("valid event JSON");
        assert_eq!(event, spring_gala());
    }

    #[test]
    fn record_deserializes_with_missing_image_list() {
        let record: AttendeeImageRecord =
            serde_json::from_str(r#"{"eventId":"ev1","uploadedAt":"2024-05-01"}"#)
                .expect("valid record JSON");
        assert!(record.matched_images.is_empty());
    }

    #[test]
    fn record_round_trips_camel_case_fields() {
        let record = AttendeeImageRecord {
            event_id: "ev1".to_string(),
            uploaded_at: "2024-05-01".to_string(),
            matched_images: vec!["https://x/a.jpg".to_string()],
        };
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("\"eventId\""));
        assert!(json.contains("\"uploadedAt\""));
        assert!(json.contains("\"matchedImages\""));
    }
}
