// SPDX-License-Identifier: MPL-2.0
//! Human-readable rendering of the service's date strings.

use crate::i18n::fluent::I18n;
use chrono::NaiveDate;

/// Formats an ISO date string ("2024-05-01" or a full RFC 3339 timestamp)
/// as e.g. "May 1, 2024". Anything unparseable falls back to the localized
/// "Date not available" string.
#[must_use]
pub fn format_event_date(raw: &str, i18n: &I18n) -> String {
    parse_date(raw).map_or_else(
        || i18n.tr("gallery-date-unavailable"),
        |date| date.format("%B %-d, %Y").to_string(),
    )
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_iso_date_formats() {
        assert_eq!(parse_date("2024-05-01").unwrap().to_string(), "2024-05-01");
    }

    #[test]
    fn rfc3339_timestamp_formats() {
        let date = parse_date("2024-05-01T18:30:00Z").unwrap();
        assert_eq!(date.to_string(), "2024-05-01");
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!(parse_date("soon").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn formatted_output_has_no_zero_padding() {
        let i18n = I18n::default();
        assert_eq!(format_event_date("2024-05-01", &i18n), "May 1, 2024");
    }

    #[test]
    fn fallback_is_localized_string() {
        let i18n = I18n::default();
        let fallback = format_event_date("not a date", &i18n);
        assert_eq!(fallback, i18n.tr("gallery-date-unavailable"));
    }
}
