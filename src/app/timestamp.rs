//! Time boundary parsing and formatting.
//!
//! Boundaries arrive from the command line either as Unix milliseconds
//! (`1700000000000`) or as a date/time string (`2024-01-15T10:30:00Z`).

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{LogSearchError, Result};

static MILLIS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// Trailing `Z`, `+HH:MM` or `+HHMM`
static OFFSET_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[Zz]|([+-])(\d{2}):?(\d{2}))$").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a time boundary into milliseconds since the Unix epoch.
///
/// A string made only of decimal digits is taken verbatim as milliseconds.
/// Anything else must be an ISO-8601 date or date-time, optionally followed
/// by `Z` or a `+HH:MM` / `+HHMM` offset; values without an offset are read
/// as UTC. Year-month (`2024-01`) means the first day of that month.
pub fn parse_timestamp(input: &str) -> Result<i64> {
    let trimmed = input.trim();

    if MILLIS_PATTERN.is_match(trimmed) {
        return trimmed
            .parse::<i64>()
            .map_err(|_| LogSearchError::invalid_timestamp(input));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_millis());
    }

    let (body, offset) = split_offset(trimmed).ok_or_else(|| LogSearchError::invalid_timestamp(input))?;
    let naive = parse_naive(body).ok_or_else(|| LogSearchError::invalid_timestamp(input))?;

    match offset {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(|dt| dt.timestamp_millis())
            .ok_or_else(|| LogSearchError::invalid_timestamp(input)),
        None => Ok(naive.and_utc().timestamp_millis()),
    }
}

/// Split a trailing UTC offset off `input`. `None` if the offset is out of range.
fn split_offset(input: &str) -> Option<(&str, Option<FixedOffset>)> {
    let Some(caps) = OFFSET_SUFFIX.captures(input) else {
        return Some((input, None));
    };
    let whole = caps.get(0)?;
    let body = &input[..whole.start()];

    let offset = match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(sign), Some(hours), Some(minutes)) => {
            let hours: i32 = hours.as_str().parse().ok()?;
            let minutes: i32 = minutes.as_str().parse().ok()?;
            if hours > 23 || minutes > 59 {
                return None;
            }
            let seconds = hours * 3600 + minutes * 60;
            let seconds = if sign.as_str() == "-" { -seconds } else { seconds };
            FixedOffset::east_opt(seconds)?
        }
        _ => FixedOffset::east_opt(0)?,
    };
    Some((body, Some(offset)))
}

fn parse_naive(body: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(body, format) {
            return Some(naive);
        }
    }

    let date = NaiveDate::parse_from_str(body, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", body), "%Y-%m-%d"))
        .ok()?;
    date.and_hms_opt(0, 0, 0)
}

/// Format epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn format_iso8601(millis: i64) -> Result<String> {
    let dt = DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| LogSearchError::invalid_timestamp(millis.to_string()))?;
    Ok(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
