use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DisplayTimeZone, TimeWindow};
use crate::error::GanttResult;

use super::presets::{PRESET_END_TIME, PRESET_START_TIME, PresetKind};
use super::range_validation::{ensure_window, is_date_selectable};
use super::time_of_day::{
    RangeBoundary, boundary_instant, format_time_of_day, parse_time_of_day, split_instant,
};
use super::{RangePolicy, SelectionOutcome};

/// Calendar dates currently picked in the range picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSelection {
    Empty,
    /// A start is chosen and the end is still open.
    StartOnly(NaiveDate),
    Complete { from: NaiveDate, to: NaiveDate },
}

impl DateSelection {
    #[must_use]
    pub fn pending_start(self) -> Option<NaiveDate> {
        match self {
            Self::StartOnly(from) => Some(from),
            Self::Empty | Self::Complete { .. } => None,
        }
    }
}

/// Picker state combining calendar dates with start/end times of day.
///
/// `window` always holds the last accepted window. Every mutation either
/// commits a new valid window or leaves the whole state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelection {
    policy: RangePolicy,
    timezone: DisplayTimeZone,
    dates: DateSelection,
    start_time: NaiveTime,
    end_time: NaiveTime,
    window: TimeWindow,
}

impl RangeSelection {
    /// Initializes the picker from an already committed window.
    pub fn from_window(
        window: TimeWindow,
        policy: RangePolicy,
        timezone: DisplayTimeZone,
    ) -> GanttResult<Self> {
        let policy = policy.validate()?;
        let timezone = timezone.validate()?;
        let (from, start_time) = split_instant(window.start(), timezone);
        let (to, end_time) = split_instant(window.end(), timezone);
        Ok(Self {
            policy,
            timezone,
            dates: DateSelection::Complete { from, to },
            start_time: truncate_to_minute(start_time),
            end_time: truncate_to_minute(end_time),
            window,
        })
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn dates(&self) -> DateSelection {
        self.dates
    }

    #[must_use]
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Start time input as `HH:MM`.
    #[must_use]
    pub fn start_time(&self) -> String {
        format_time_of_day(self.start_time)
    }

    /// End time input as `HH:MM`.
    #[must_use]
    pub fn end_time(&self) -> String {
        format_time_of_day(self.end_time)
    }

    /// Applies a calendar pick.
    ///
    /// A pick without `to` only records the pending start. A complete pick is
    /// combined with the current times of day and committed if the resulting
    /// window passes the policy.
    pub fn pick_dates(&mut self, from: NaiveDate, to: Option<NaiveDate>) -> SelectionOutcome {
        let Some(to) = to else {
            self.dates = DateSelection::StartOnly(from);
            return SelectionOutcome::Pending;
        };

        match self.candidate(from, to, self.start_time, self.end_time) {
            Some(window) => {
                self.dates = DateSelection::Complete { from, to };
                self.window = window;
                SelectionOutcome::Applied
            }
            None => SelectionOutcome::Rejected,
        }
    }

    /// Updates the start time of day; malformed input is an error.
    ///
    /// Only the window start is rebuilt. The committed end stays as it is.
    pub fn set_start_time(&mut self, value: &str) -> GanttResult<SelectionOutcome> {
        let start_time = parse_time_of_day(value)?;
        Ok(self.retime(RangeBoundary::Start, start_time))
    }

    /// Updates the end time of day; malformed input is an error.
    ///
    /// Only the window end is rebuilt. The committed start stays as it is.
    pub fn set_end_time(&mut self, value: &str) -> GanttResult<SelectionOutcome> {
        let end_time = parse_time_of_day(value)?;
        Ok(self.retime(RangeBoundary::End, end_time))
    }

    /// Replaces dates and times with a preset window.
    pub fn apply_preset(
        &mut self,
        kind: PresetKind,
        today: NaiveDate,
    ) -> GanttResult<SelectionOutcome> {
        let (from, to) = kind.date_range(today)?;
        let start_time = parse_time_of_day(PRESET_START_TIME)?;
        let end_time = parse_time_of_day(PRESET_END_TIME)?;

        let Some(window) = self.candidate(from, to, start_time, end_time) else {
            return Ok(SelectionOutcome::Rejected);
        };
        self.dates = DateSelection::Complete { from, to };
        self.start_time = start_time;
        self.end_time = end_time;
        self.window = window;
        Ok(SelectionOutcome::Applied)
    }

    /// Drops the picked dates; the committed window is kept.
    pub fn clear(&mut self) {
        self.dates = DateSelection::Empty;
    }

    #[must_use]
    pub fn is_date_selectable(&self, candidate: NaiveDate) -> bool {
        is_date_selectable(candidate, self.dates.pending_start(), self.policy)
    }

    fn retime(&mut self, boundary: RangeBoundary, time: NaiveTime) -> SelectionOutcome {
        let DateSelection::Complete { from, to } = self.dates else {
            // Nothing to recombine with yet; the input is remembered for the next pick.
            self.set_boundary_time(boundary, time);
            return SelectionOutcome::Pending;
        };

        let rebuilt = match boundary {
            RangeBoundary::Start => boundary_instant(from, time, boundary, self.timezone)
                .map(|start| (start, self.window.end())),
            RangeBoundary::End => boundary_instant(to, time, boundary, self.timezone)
                .map(|end| (self.window.start(), end)),
        };
        match rebuilt.and_then(|(start, end)| ensure_window(start, end, self.policy)) {
            Ok(window) => {
                self.set_boundary_time(boundary, time);
                self.window = window;
                SelectionOutcome::Applied
            }
            Err(err) => {
                debug!(?boundary, %time, error = %err, "time of day change rejected");
                SelectionOutcome::Rejected
            }
        }
    }

    fn set_boundary_time(&mut self, boundary: RangeBoundary, time: NaiveTime) {
        match boundary {
            RangeBoundary::Start => self.start_time = time,
            RangeBoundary::End => self.end_time = time,
        }
    }

    fn candidate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Option<TimeWindow> {
        let start = boundary_instant(from, start_time, RangeBoundary::Start, self.timezone);
        let end = boundary_instant(to, end_time, RangeBoundary::End, self.timezone);
        let result = match (start, end) {
            (Ok(start), Ok(end)) => ensure_window(start, end, self.policy),
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        result
            .inspect_err(|err| {
                debug!(%from, %to, error = %err, "range selection rejected");
            })
            .ok()
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::{DateSelection, RangeSelection};
    use crate::core::{DisplayTimeZone, TimeWindow};
    use crate::interaction::{RangePolicy, SelectionOutcome};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, day).expect("date")
    }

    fn selection() -> RangeSelection {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 1, 3, 23, 59, 59).unwrap(),
        )
        .expect("window");
        RangeSelection::from_window(window, RangePolicy::default(), DisplayTimeZone::Utc)
            .expect("selection")
    }

    #[test]
    fn from_window_recovers_dates_and_times() {
        let selection = selection();
        assert_eq!(
            selection.dates(),
            DateSelection::Complete {
                from: date(1),
                to: date(3)
            }
        );
        assert_eq!(selection.start_time(), "00:00");
        assert_eq!(selection.end_time(), "23:59");
    }

    #[test]
    fn pending_start_restricts_selectable_dates() {
        let mut selection = selection();
        assert_eq!(selection.pick_dates(date(10), None), SelectionOutcome::Pending);
        assert!(selection.is_date_selectable(date(17)));
        assert!(!selection.is_date_selectable(date(18)));
    }

    #[test]
    fn editing_start_time_keeps_committed_end_instant() {
        let mut selection = selection();
        let end = selection.window().end();
        assert_eq!(
            selection.set_start_time("06:00").expect("time"),
            SelectionOutcome::Applied
        );
        assert_eq!(selection.window().end(), end);
        assert_eq!(
            selection.window().start(),
            Utc.with_ymd_and_hms(2022, 1, 1, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn reversed_pick_is_rejected_without_side_effects() {
        let mut selection = selection();
        let before = selection.clone();
        assert_eq!(
            selection.pick_dates(date(5), Some(date(4))),
            SelectionOutcome::Rejected
        );
        assert_eq!(selection, before);
    }
}
