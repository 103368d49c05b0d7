use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Widest window a user may select.
pub const MAX_RANGE_DAYS: u32 = 7;

/// Span limit applied to selected windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangePolicy {
    #[serde(default = "default_max_span_days")]
    pub max_span_days: u32,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            max_span_days: MAX_RANGE_DAYS,
        }
    }
}

impl RangePolicy {
    #[must_use]
    pub fn with_max_span_days(mut self, days: u32) -> Self {
        self.max_span_days = days;
        self
    }

    #[must_use]
    pub fn max_span(self) -> Duration {
        Duration::days(i64::from(self.max_span_days))
    }

    pub fn validate(self) -> GanttResult<Self> {
        // Bounded so that `max_span` stays far inside chrono's range.
        if !(1..=3660).contains(&self.max_span_days) {
            return Err(GanttError::InvalidConfig(
                "range max span must be between 1 and 3660 days".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_max_span_days() -> u32 {
    MAX_RANGE_DAYS
}
