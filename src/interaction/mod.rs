//! Range selection: validating, normalizing and presetting time windows.

mod presets;
mod range_policy;
mod range_selection;
mod range_validation;
mod time_of_day;

use serde::{Deserialize, Serialize};

pub use presets::{
    PRESET_END_TIME, PRESET_START_TIME, PresetKind, compute_preset, today_in,
};
pub use range_policy::{MAX_RANGE_DAYS, RangePolicy};
pub use range_selection::{DateSelection, RangeSelection};
pub use range_validation::{ensure_window, is_date_selectable, validate_window};
pub use time_of_day::{
    RangeBoundary, boundary_instant, combine_date_and_time, format_time_of_day,
    parse_time_of_day, split_instant,
};

/// Result of a soft selection change.
///
/// Rejection is routine while a user is picking, so it is a value rather
/// than an error; the previous state stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    Applied,
    /// Recorded, but not enough input yet to commit a window.
    Pending,
    Rejected,
}

impl SelectionOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }
}
