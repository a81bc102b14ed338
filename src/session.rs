// SPDX-License-Identifier: MPL-2.0
//! Signed-in attendee identity.
//!
//! The service identifies attendees by the email they registered with; there
//! is no server-side session. The email is carried as a value type so the
//! screens that need an identity take it explicitly instead of reading a
//! global.

use std::fmt;

/// The signed-in attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
}

impl Session {
    /// Wraps an email that already passed [`is_plausible_email`].
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// The attendee email used to key collaborator calls.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Cheap syntactic check used to enable the login button.
///
/// This is not RFC-grade validation; the server is the authority on whether
/// an email is known. We only reject strings that cannot possibly be one.
#[must_use]
pub fn is_plausible_email(input: &str) -> bool {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@') && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(is_plausible_email("  spaced@host.org  "));
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("no-at-sign"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("local@"));
        assert!(!is_plausible_email("local@nodot"));
    }

    #[test]
    fn rejects_double_at() {
        assert!(!is_plausible_email("a@b@c.com"));
    }

    #[test]
    fn session_exposes_email() {
        let session = Session::new("ada@example.com");
        assert_eq!(session.email(), "ada@example.com");
        assert_eq!(session.to_string(), "ada@example.com");
    }
}
