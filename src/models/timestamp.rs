//! Lenient timestamp parsing
//!
//! The backend mixes offset-less `LocalDateTime` strings, RFC 3339 instants
//! and bare dates. Everything is normalized to local wall-clock time so that
//! month, weekday and hour bucketing match what an operator sees.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a backend timestamp into local wall-clock time.
///
/// Returns `None` for empty or unrecognized input; callers treat that the
/// same as a missing field.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_local_date_time() {
        let dt = parse_timestamp("2026-03-14T09:26:53").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2026, 3, 14));
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_fractional_seconds() {
        let dt = parse_timestamp("2026-03-14T09:26:53.123456").unwrap();
        assert_eq!(dt.minute(), 26);
    }

    #[test]
    fn test_space_separated() {
        let dt = parse_timestamp("2026-03-14 18:00:00").unwrap();
        assert_eq!(dt.hour(), 18);
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let dt = parse_timestamp("2026-03-14").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.day(), 14);
    }

    #[test]
    fn test_rfc3339_is_accepted() {
        assert!(parse_timestamp("2026-03-14T09:26:53Z").is_some());
        assert!(parse_timestamp("2026-03-14T09:26:53+05:30").is_some());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2026-13-40").is_none());
    }
}
