use chrono::{DateTime, NaiveDate, Utc};
use tracing::trace;

use crate::core::TimeWindow;
use crate::error::{GanttError, GanttResult};

use super::RangePolicy;

/// Soft check for a candidate window.
///
/// `false` when `end < start` or the span exceeds the policy maximum; a span
/// of exactly the maximum is accepted.
#[must_use]
pub fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>, policy: RangePolicy) -> bool {
    end >= start && end - start <= policy.max_span()
}

/// Strict variant of [`validate_window`] returning the committed window.
pub fn ensure_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    policy: RangePolicy,
) -> GanttResult<TimeWindow> {
    if end < start {
        return Err(GanttError::InvalidWindow {
            start,
            end,
            reason: "end precedes start",
        });
    }
    if end - start > policy.max_span() {
        return Err(GanttError::InvalidWindow {
            start,
            end,
            reason: "window exceeds the maximum span",
        });
    }
    TimeWindow::new(start, end)
}

/// Whether a calendar date may be picked as the end of a pending range.
///
/// `pending_start` is `Some` only while a start is chosen and the end is not;
/// otherwise every date is selectable because a new pick starts over.
#[must_use]
pub fn is_date_selectable(
    candidate: NaiveDate,
    pending_start: Option<NaiveDate>,
    policy: RangePolicy,
) -> bool {
    let Some(start) = pending_start else {
        return true;
    };
    let distance_days = (candidate - start).num_days().abs();
    let selectable = distance_days <= i64::from(policy.max_span_days);
    trace!(%candidate, %start, distance_days, selectable, "date selectability");
    selectable
}
