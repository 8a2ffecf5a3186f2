//! Timestamp conversions for the storage boundary.
//!
//! Dates persist as epoch milliseconds in INTEGER columns; the domain works
//! in `chrono::DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::common::errors::PersistenceError;

/// Project a timestamp to its stored integer form.
pub fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// Reconstruct a timestamp from its stored integer form.
pub fn from_millis(field: &str, millis: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        PersistenceError::malformed(field, format!("{millis} is out of timestamp range"))
    })
}

/// Midnight UTC of a calendar date, the canonical form for whole-day
/// values such as submission dates.
pub fn date_utc(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
