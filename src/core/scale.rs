use chrono::{DateTime, Duration, Utc};

use crate::core::types::TimeWindow;
use crate::error::{GanttError, GanttResult};

/// Linear mapping from absolute instants to fractions of a window.
///
/// `0.0` is the window start and `1.0` the window end. Values outside the
/// window map outside `[0, 1]`; callers decide whether to clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScale {
    origin: DateTime<Utc>,
    span_ms: f64,
}

impl WindowScale {
    /// Fails with `InvalidWindow` for zero-duration windows.
    pub fn new(window: TimeWindow) -> GanttResult<Self> {
        let span_ms = window.duration().num_milliseconds();
        if span_ms <= 0 {
            return Err(GanttError::InvalidWindow {
                start: window.start(),
                end: window.end(),
                reason: "window duration must be > 0",
            });
        }

        Ok(Self {
            origin: window.start(),
            span_ms: span_ms as f64,
        })
    }

    #[must_use]
    pub fn instant_to_fraction(self, instant: DateTime<Utc>) -> f64 {
        (instant - self.origin).num_milliseconds() as f64 / self.span_ms
    }

    #[must_use]
    pub fn duration_to_fraction(self, duration: Duration) -> f64 {
        duration.num_milliseconds() as f64 / self.span_ms
    }

    /// Inverse of `instant_to_fraction`, rounded to the millisecond.
    #[must_use]
    pub fn fraction_to_instant(self, fraction: f64) -> DateTime<Utc> {
        let offset_ms = (fraction * self.span_ms).round() as i64;
        self.origin + Duration::milliseconds(offset_ms)
    }
}
