//! Canonical UTC timestamp handling.
//!
//! All stored timestamps are ISO-8601 strings in UTC with a fixed-width
//! format, so lexicographic order on the stored strings equals
//! chronological order. Windowed queries (login attempts, lockout
//! expiries) rely on this invariant.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Formats a timestamp as a fixed-width ISO-8601 UTC string.
#[must_use]
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Returns the current time as a stored-format timestamp string.
#[must_use]
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

/// Parses a stored timestamp string back into a UTC datetime.
#[must_use]
pub fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a client-supplied date for retroactive entries.
///
/// Accepts either a full RFC 3339 timestamp or a plain `YYYY-MM-DD`
/// date (interpreted as midnight UTC). Returns `None` for anything
/// else; the caller decides whether that is an error.
#[must_use]
pub fn parse_user_date(s: &str) -> Option<DateTime<Utc>> {
    if let Some(dt) = parse_iso(s) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2025, 8, 1, 12, 30, 45).unwrap();
        let s = to_iso(dt);
        assert_eq!(parse_iso(&s), Some(dt));
    }

    #[test]
    fn test_iso_is_fixed_width_and_ordered() {
        let early = Utc.with_ymd_and_hms(2025, 7, 31, 23, 59, 59).unwrap();
        let late = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        let (a, b) = (to_iso(early), to_iso(late));
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_parse_user_date_plain() {
        let dt = parse_user_date("2024-10-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 10, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_user_date_full_timestamp() {
        let dt = parse_user_date("2024-10-15T08:15:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 10, 15, 8, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_user_date_garbage() {
        assert!(parse_user_date("gestern").is_none());
        assert!(parse_user_date("15.10.2024").is_none());
    }
}
