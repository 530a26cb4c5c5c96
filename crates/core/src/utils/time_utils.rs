use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::constants::{
    DATE_FORMAT, LOCAL_TIMESTAMP_FORMAT, UPDATED_AT_FORMAT, UPDATED_AT_FRACTION_FORMAT,
};
use crate::errors::{Result, ValidationError};

/// Parses a `YYYY-MM-DD HH:MM:SS` wall-clock timestamp.
pub fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(value, LOCAL_TIMESTAMP_FORMAT)?)
}

/// Attaches `tz` to a wall-clock timestamp.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// fall into a DST gap are rejected.
pub fn localize(timestamp: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&timestamp) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ValidationError::NonexistentLocalTime {
            timestamp,
            timezone: tz.name().to_string(),
        }
        .into()),
    }
}

/// Formats a date the way `data.dates` stores it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// ISO-8601 local timestamp with six fraction digits, or none on a whole
/// second. Sub-microsecond precision is dropped.
pub fn format_updated_at(timestamp: NaiveDateTime) -> String {
    let mut formatted = timestamp.format(UPDATED_AT_FORMAT).to_string();
    if timestamp.nanosecond() / 1_000 != 0 {
        formatted.push_str(&timestamp.format(UPDATED_AT_FRACTION_FORMAT).to_string());
    }
    formatted
}

/// Lenient date parsing for externally produced series.
///
/// Accepts a plain date, a wall-clock timestamp with `T` or space separator,
/// or an RFC 3339 timestamp; only the calendar date is kept.
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}
