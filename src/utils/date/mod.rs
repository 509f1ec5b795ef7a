// Date utility functions
// Minute-axis conversions, edit-granularity snapping and time labels

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes elapsed since the Unix epoch (floored for times before it).
pub fn minutes_since_epoch(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp().div_euclid(60)
}

/// Inverse of [`minutes_since_epoch`].
pub fn from_minutes_since_epoch(minutes: i64) -> NaiveDateTime {
    DateTime::from_timestamp(minutes * 60, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// Snap `time` to the nearest multiple of `granularity_minutes`.
///
/// Ties round up, so with 30 minute granularity 9:15 becomes 9:30.
pub fn round_to_granularity(time: NaiveDateTime, granularity_minutes: u32) -> NaiveDateTime {
    let granularity = i64::from(granularity_minutes.max(1));
    let minutes = minutes_since_epoch(time);
    let snapped = (minutes + granularity / 2).div_euclid(granularity) * granularity;
    from_minutes_since_epoch(snapped)
}

/// `HH:MM` label for a single instant.
pub fn format_time(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

/// `HH:MM-HH:MM` label used by the drag preview and the hover popup.
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{}-{}", format_time(start), format_time(end))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Whole days between two dates, never negative.
pub fn days_between(lower: NaiveDate, upper: NaiveDate) -> i64 {
    (upper - lower).num_days().max(0)
}

pub fn add_days(time: NaiveDateTime, days: u32) -> NaiveDateTime {
    time + Duration::days(i64::from(days))
}
