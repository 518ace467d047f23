//! Shared timestamp parsing utilities for event data importers

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A timestamp string that is not a valid ISO 8601 date or date-time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected timestamp format: '{value}'")]
pub struct TimestampParseError {
    /// The rejected input
    pub value: String,
}

/// Parse an ISO 8601 timestamp string to `DateTime<FixedOffset>`.
///
/// Values without an offset are interpreted as UTC.
///
/// # Supported Formats (in order of precedence)
/// 1. RFC3339: `2023-10-06T09:30:21+00:00`, `2023-10-06T09:30:21Z`
/// 2. ISO 8601 with offset (no colon): `2023-10-06T09:30:21+0000`
/// 3. Naive ISO 8601 (optional fractional seconds): `2023-10-06T09:30:21.348555`
/// 4. Naive with space separator: `2023-10-06 09:30:21.890421`
/// 5. Space separator with offset: `2023-10-06 09:30:21+02:00`
/// 6. Without seconds: `2023-10-06T09:30`, `2023-10-06 09:30`, `2023-10-06T09:30+02:00`, `2023-10-06T09`
/// 7. Date only: `2023-10-06` (midnight)
pub fn parse_timestamp(time: &str) -> Result<DateTime<FixedOffset>, TimestampParseError> {
    let time = time.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt);
    }

    // Handles "2024-10-02T07:55:15.348555" as well as "2022-01-09T15:00:00"
    if let Ok(dt) = NaiveDateTime::parse_from_str(time, "%FT%T%.f") {
        return Ok(dt.and_utc().into());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(time, "%F %T%.f") {
        return Ok(dt.and_utc().into());
    }

    if let Ok(dt) = DateTime::parse_from_str(time, "%F %T%.f%:z") {
        return Ok(dt);
    }

    // Reduced precision (no seconds, or hour only)
    for format in ["%FT%H:%M%:z", "%FT%H:%M%z", "%F %H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(time, format) {
            return Ok(dt);
        }
    }
    let naive = time.strip_suffix('Z').unwrap_or(time);
    for format in ["%FT%H:%M", "%F %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt.and_utc().into());
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(&format!("{naive}:00"), "%FT%H:%M") {
        return Ok(dt.and_utc().into());
    }

    if let Ok(date) = NaiveDate::parse_from_str(time, "%F") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().into());
        }
    }

    Err(TimestampParseError {
        value: time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_rfc3339() {
        let result = parse_timestamp("2023-10-06T09:30:21+02:00").unwrap();
        assert_eq!(result.offset().local_minus_utc(), 2 * 3600);
        assert!(parse_timestamp("2023-10-06T09:30:21Z").is_ok());
    }

    #[test]
    fn test_offset_without_colon() {
        assert!(parse_timestamp("2023-10-06T09:30:21+0000").is_ok());
    }

    #[test]
    fn test_naive_iso_is_utc() {
        let result = parse_timestamp("2023-10-06T09:30:21").unwrap();
        assert_eq!(result.offset().local_minus_utc(), 0);
        assert_eq!(result.hour(), 9);
        assert!(parse_timestamp("2024-10-02T07:55:15.348555").is_ok());

        let minutes = parse_timestamp("2024-01-02T10:15").unwrap();
        assert_eq!(minutes.offset().local_minus_utc(), 0);
        assert_eq!((minutes.hour(), minutes.minute(), minutes.second()), (10, 15, 0));
        assert_eq!(parse_timestamp("2024-01-02 10:15").unwrap(), minutes);
        assert_eq!(parse_timestamp("2024-01-02T10:15Z").unwrap(), minutes);

        let hour = parse_timestamp("2024-01-02T10").unwrap();
        assert_eq!((hour.hour(), hour.minute()), (10, 0));
        assert_eq!(hour.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_without_seconds() {
        let result = parse_timestamp("2024-01-02T10:00+01:00").unwrap();
        assert_eq!(result.offset().local_minus_utc(), 3600);
        assert_eq!(result.hour(), 10);
        assert_eq!(
            parse_timestamp("2024-01-02T10:00+0100").unwrap(),
            result
        );
        assert_eq!(
            parse_timestamp("2024-01-02 10:00+01:00").unwrap(),
            result
        );
    }

    #[test]
    fn test_naive_space_separated() {
        assert!(parse_timestamp("2023-10-06 09:30:21.890421").is_ok());
        assert!(parse_timestamp("2023-10-06 09:30:21").is_ok());
    }

    #[test]
    fn test_date_only() {
        let result = parse_timestamp("2023-10-06").unwrap();
        assert_eq!(result.day(), 6);
        assert_eq!(result.hour(), 0);
    }

    #[test]
    fn test_invalid() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.value, "yesterday");
        assert!(parse_timestamp("Fri, 06 Oct 2023 09:30:21 +0000").is_err());
    }
}
