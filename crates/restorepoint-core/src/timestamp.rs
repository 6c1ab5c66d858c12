//! Timestamp parsing and formatting for restore-point tables.
//!
//! Restore-point exports are not consistent about timestamp rendering:
//! PowerShell's default `ToString()` produces US-style `1/30/2023
//! 10:05:00 PM`, while re-exported tables tend to carry ISO-like
//! `2023-01-30 22:05:00` or bare dates. `parse_timestamp` accepts all of
//! these and normalizes to `DateTime<Utc>`; naive inputs are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use snafu::prelude::*;

/// Errors produced when a cell cannot be interpreted as a timestamp.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseTimestampError {
    /// The cell was empty or only whitespace.
    #[snafu(display("timestamp value is empty"))]
    Empty,

    /// The cell did not match any supported timestamp format.
    #[snafu(display("unrecognized timestamp format: '{value}'"))]
    UnrecognizedFormat {
        /// The original cell value.
        value: String,
    },
}

/// Naive formats tried in order after RFC 3339 fails.
///
/// The US-style entries cover PowerShell default rendering with and
/// without zero-padded fields; `%-m`/`%-d`/`%-I` also match padded input.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%-m/%-d/%Y %-I:%M:%S %p",
    "%-m/%-d/%Y %H:%M:%S",
];

/// Parse a single cell into a UTC instant.
///
/// Attempts, in order: RFC 3339 (offset respected), the naive formats in
/// [`NAIVE_DATETIME_FORMATS`], then a bare `YYYY-MM-DD` date mapped to
/// midnight. Naive matches are interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ParseTimestampError::Empty);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day_start(date));
    }

    UnrecognizedFormatSnafu {
        value: value.to_string(),
    }
    .fail()
}

/// Render a timestamp the way reduced tables are written back out.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// First instant of `date` (00:00:00 UTC), for day-granular window starts.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last whole second of `date` (23:59:59 UTC), for day-granular window
/// ends. Keeps an inclusive `--date-end` covering restore points created
/// any time during the end day.
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(last_second).and_utc()
}
