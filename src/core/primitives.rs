use chrono::{DateTime, Utc};

use crate::error::{GanttError, GanttResult};

/// Parses an ISO 8601 / RFC 3339 instant such as `2022-01-01T05:00:00Z`.
pub fn parse_instant(value: &str) -> GanttResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GanttError::MalformedInput(format!("invalid instant `{value}`: {e}")))
}

/// Whole minutes between two instants, truncated toward zero.
#[must_use]
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::{duration_minutes, parse_instant};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_instant_normalizes_offsets_to_utc() {
        let parsed = parse_instant("2022-01-01T08:00:00+08:00").expect("valid instant");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        let err = parse_instant("yesterday").expect_err("must fail");
        assert!(format!("{err}").contains("invalid instant"));
    }

    #[test]
    fn partial_minutes_are_truncated() {
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2022, 1, 1, 1, 30, 59).unwrap();
        assert_eq!(duration_minutes(start, end), 90);
    }
}
