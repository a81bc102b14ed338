// SPDX-License-Identifier: MPL-2.0
//! Collaborator contracts with the event-photography service.

mod client;
mod types;

pub use client::ApiClient;
pub use types::{
    image_id_from_url, matched_images_for_event, AttendeeImageRecord, Event, MatchedImage,
};
