use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DisplayTimeZone, TimeWindow, WindowScale};
use crate::error::{GanttError, GanttResult};

use super::axis_label_format::format_marker_label;

/// Gridline / time-axis label at a fixed hour cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMarker {
    pub instant: DateTime<Utc>,
    pub label: String,
    /// Position within the window, clamped to `[0, 1]`.
    pub fraction: f64,
}

impl TimeMarker {
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Builds markers every `step_hours`, aligned to wall-clock hour multiples.
///
/// The first marker sits on the window start's local date at
/// `ceil(hour / step) * step`, rolling into the next day past midnight.
/// A start that is not on the hour can leave the first marker slightly before
/// the window; its fraction is clamped to `0`. Markers continue while they are
/// `<= window.end()`. `step_hours` must be within `1..=24`.
pub fn time_markers(
    window: TimeWindow,
    step_hours: u32,
    timezone: DisplayTimeZone,
) -> GanttResult<Vec<TimeMarker>> {
    if !(1..=24).contains(&step_hours) {
        return Err(GanttError::InvalidConfig(format!(
            "marker step must be between 1 and 24 hours, got {step_hours}"
        )));
    }
    let scale = WindowScale::new(window)?;

    let local_start = timezone.to_local(window.start());
    let aligned_hour = local_start.hour().div_ceil(step_hours) * step_hours;
    let local_midnight = local_start.date_naive().and_time(NaiveTime::MIN);
    let first_local = local_midnight + Duration::hours(i64::from(aligned_hour));

    let step = Duration::hours(i64::from(step_hours));
    let mut current = timezone.from_local(first_local)?;
    let mut markers = Vec::new();
    while current <= window.end() {
        markers.push(TimeMarker {
            instant: current,
            label: format_marker_label(timezone.to_local(current)),
            fraction: scale.instant_to_fraction(current).clamp(0.0, 1.0),
        });
        current += step;
    }

    Ok(markers)
}
