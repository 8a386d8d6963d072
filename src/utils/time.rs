//! Timestamp parsing for order records
//!
//! Order timestamps arrive from the storage collaborator either as strings
//! or as Unix seconds. All of them are normalised to UTC here; conversion to
//! the reporting time zone happens in the time bucketer.

use crate::errors::{ValidationError, ValidationResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Accepted naive datetime layouts, interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse an order timestamp
///
/// Accepts RFC 3339 (`2024-03-04T10:00:00Z`, `2024-03-04T10:00:00+01:00`),
/// SQL-style naive datetimes (`2024-03-04 10:00:00`, treated as UTC) and bare
/// dates (`2024-03-04`, midnight UTC).
///
/// # Examples
/// ```
/// use storefront_analytics::utils::time::parse_timestamp;
/// let ts = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(ts.timestamp(), 1704067200);
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> ValidationResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::timestamp(input));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| ValidationError::timestamp(input))
}

/// Convert Unix seconds to a UTC timestamp
///
/// # Examples
/// ```
/// use storefront_analytics::utils::time::timestamp_from_unix;
/// assert_eq!(timestamp_from_unix(0).unwrap().to_rfc3339(), "1970-01-01T00:00:00+00:00");
/// assert!(timestamp_from_unix(i64::MAX).is_err());
/// ```
pub fn timestamp_from_unix(seconds: i64) -> ValidationResult<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| ValidationError::timestamp(seconds.to_string()))
}
