// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the event-photography service.
//!
//! Two collaborator calls, both asynchronous:
//!
//! - [`ApiClient::event_by_id`]: `GET {base}/events/{id}`; a `404` is the
//!   "no such event" answer, not an error.
//! - [`ApiClient::attendee_images`]: `GET {base}/attendees/{email}/images`.
//!
//! No retries and no explicit timeouts; failures are reported to the caller,
//! which decides how (or whether) to surface them.

use super::types::{AttendeeImageRecord, Event};
use crate::error::{Error, Result};
use reqwest::StatusCode;

const USER_AGENT: &str = concat!("EventLens/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a shared `reqwest::Client` bound to a base URL.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the given base URL (trailing slash tolerated).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// The HTTP client shared with the download engine, so image fetches
    /// reuse the same connection pool.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up a single event. `Ok(None)` means the service does not know
    /// the id; the caller treats that as a redirect, not a failure.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-404 error status, or an
    /// undecodable body.
    pub async fn event_by_id(&self, id: &str) -> Result<Option<Event>> {
        let url = format!("{}/events/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let event = serde_json::from_slice(&body)?;
        Ok(Some(event))
    }

    /// Fetches every matched-image record for an attendee, across all events.
    /// Filtering to one event happens on the caller's side.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status, or an
    /// undecodable body.
    pub async fn attendee_images(&self, email: &str) -> Result<Vec<AttendeeImageRecord>> {
        let url = format!("{}/attendees/{}/images", self.base_url, email);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let body = response.bytes().await?;
        let records = serde_json::from_slice(&body)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_base_url() {
        let client = ApiClient::new("https://api.example.com/").expect("client builds");
        assert_eq!(client.base_url(), "https://api.example.com");

        let client = ApiClient::new("https://api.example.com///").expect("client builds");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn base_url_without_slash_is_unchanged() {
        let client = ApiClient::new("http://localhost:8080").expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
