use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::DisplayTimeZone;
use crate::error::{GanttError, GanttResult};

/// Which end of a window an instant is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeBoundary {
    /// Seconds and milliseconds are zeroed.
    Start,
    /// Seconds are `59` and milliseconds `999`, covering the whole minute.
    End,
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(value: &str) -> GanttResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| GanttError::MalformedInput(format!("invalid time of day `{value}`: {e}")))
}

#[must_use]
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Merges a calendar date with an `HH:MM` time of day into an instant.
///
/// An end boundary lands on `HH:MM:59.999` so that `23:59` includes the
/// whole last minute of the day.
pub fn combine_date_and_time(
    date: NaiveDate,
    time_of_day: &str,
    boundary: RangeBoundary,
    timezone: DisplayTimeZone,
) -> GanttResult<DateTime<Utc>> {
    let parsed = parse_time_of_day(time_of_day)?;
    boundary_instant(date, parsed, boundary, timezone)
}

/// Same as [`combine_date_and_time`] for an already parsed time of day.
///
/// Only the hour and minute of `time` are used.
pub fn boundary_instant(
    date: NaiveDate,
    time: NaiveTime,
    boundary: RangeBoundary,
    timezone: DisplayTimeZone,
) -> GanttResult<DateTime<Utc>> {
    let (second, milli) = match boundary {
        RangeBoundary::Start => (0, 0),
        RangeBoundary::End => (59, 999),
    };
    let time = NaiveTime::from_hms_milli_opt(time.hour(), time.minute(), second, milli)
        .ok_or_else(|| GanttError::MalformedInput(format!("invalid time of day `{time}`")))?;
    timezone.from_local(date.and_time(time))
}

/// Splits an instant back into its wall-clock date and time in `timezone`.
#[must_use]
pub fn split_instant(instant: DateTime<Utc>, timezone: DisplayTimeZone) -> (NaiveDate, NaiveTime) {
    let local = timezone.to_local(instant);
    (local.date_naive(), local.time())
}
