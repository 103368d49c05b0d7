use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DisplayTimeZone, TimeWindow};
use crate::error::{GanttError, GanttResult};

use super::time_of_day::{RangeBoundary, combine_date_and_time};

pub const PRESET_START_TIME: &str = "00:00";
pub const PRESET_END_TIME: &str = "23:59";

/// Quick-pick windows anchored on today's local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetKind {
    Today,
    /// Today plus the next two calendar days.
    ShortRange,
    /// Today plus the next six calendar days.
    Week,
}

impl PresetKind {
    #[must_use]
    pub fn extra_days(self) -> u64 {
        match self {
            Self::Today => 0,
            Self::ShortRange => 2,
            Self::Week => 6,
        }
    }

    /// Inclusive first and last calendar day of the preset.
    pub fn date_range(self, today: NaiveDate) -> GanttResult<(NaiveDate, NaiveDate)> {
        let last = today
            .checked_add_days(Days::new(self.extra_days()))
            .ok_or_else(|| GanttError::MalformedInput(format!("date overflow after {today}")))?;
        Ok((today, last))
    }
}

impl FromStr for PresetKind {
    type Err = GanttError;

    fn from_str(value: &str) -> GanttResult<Self> {
        match value.trim() {
            "today" => Ok(Self::Today),
            "3days" | "shortRange" | "short_range" => Ok(Self::ShortRange),
            "week" => Ok(Self::Week),
            other => Err(GanttError::MalformedInput(format!(
                "unknown range preset `{other}`"
            ))),
        }
    }
}

/// Window from `today 00:00:00.000` to `today + n days 23:59:59.999`.
pub fn compute_preset(
    kind: PresetKind,
    today: NaiveDate,
    timezone: DisplayTimeZone,
) -> GanttResult<TimeWindow> {
    let (first, last) = kind.date_range(today)?;
    let start = combine_date_and_time(first, PRESET_START_TIME, RangeBoundary::Start, timezone)?;
    let end = combine_date_and_time(last, PRESET_END_TIME, RangeBoundary::End, timezone)?;
    TimeWindow::new(start, end)
}

/// Current calendar date in `timezone`.
#[must_use]
pub fn today_in(timezone: DisplayTimeZone) -> NaiveDate {
    timezone.to_local(Utc::now()).date_naive()
}
