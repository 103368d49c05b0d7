use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

const MAX_OFFSET_MINUTES: i16 = 14 * 60;

/// Wall-clock zone used to interpret dates, times of day and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
}

impl DisplayTimeZone {
    #[must_use]
    pub fn offset_minutes(self) -> i16 {
        match self {
            Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    pub fn validate(self) -> GanttResult<Self> {
        let minutes = self.offset_minutes();
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(GanttError::InvalidConfig(format!(
                "timezone offset must be between -{MAX_OFFSET_MINUTES} and {MAX_OFFSET_MINUTES} minutes"
            )));
        }
        Ok(self)
    }

    /// Resolves the chrono offset; out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }

    #[must_use]
    pub fn to_local(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.fixed_offset())
    }

    /// Interprets a wall-clock value in this zone as an absolute instant.
    ///
    /// Fixed offsets have no gaps or folds, so the mapping is always unique.
    pub fn from_local(self, local: NaiveDateTime) -> GanttResult<DateTime<Utc>> {
        self.fixed_offset()
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                GanttError::MalformedInput(format!("unrepresentable local time {local}"))
            })
    }
}
