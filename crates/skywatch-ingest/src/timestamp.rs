//! Defensive multi-format timestamp parsing
//!
//! The upstream APIs report timestamps in several layouts. Parsing tries an
//! ordered list of format specifiers and stops at the first success;
//! exhaustion is a distinct unparseable outcome (`None`), not an error.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats reported for asteroid close approaches, in fallback order:
/// `"2024-01-15 10:30:00"` then `"2025-Aug-10 09:08"`.
pub const APPROACH_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%b-%d %H:%M"];

/// Formats reported for solar flare timing, in fallback order:
/// zoned seconds, unzoned seconds (assumed UTC), zoned without seconds.
pub const FLARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%MZ",
];

/// Parse a timestamp against an ordered list of formats, first match wins.
///
/// All formats are naive; the result is interpreted as UTC.
pub fn parse_utc(value: &str, formats: &[&str]) -> Option<DateTime<Utc>> {
    formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_approach_primary_format() {
        let parsed = parse_utc("2024-01-15 10:30:00", APPROACH_FORMATS).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn parses_approach_abbreviated_month_format() {
        let parsed = parse_utc("2025-Aug-10 09:08", APPROACH_FORMATS).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 8, 10, 9, 8, 0).unwrap());
    }

    #[test]
    fn parses_flare_zoned_seconds_format() {
        let parsed = parse_utc("2024-01-15T10:30:00Z", FLARE_FORMATS).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn parses_flare_unzoned_seconds_format() {
        let parsed = parse_utc("2024-01-15T10:30:00", FLARE_FORMATS).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn parses_flare_zoned_minutes_format() {
        let parsed = parse_utc("2024-01-15T10:30Z", FLARE_FORMATS).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn exhaustion_is_none_not_error() {
        assert!(parse_utc("not a timestamp", APPROACH_FORMATS).is_none());
        assert!(parse_utc("2024/01/15 10:30", APPROACH_FORMATS).is_none());
        assert!(parse_utc("", FLARE_FORMATS).is_none());
    }

    #[test]
    fn approach_formats_do_not_accept_flare_layout() {
        assert!(parse_utc("2024-01-15T10:30:00Z", APPROACH_FORMATS).is_none());
    }
}
