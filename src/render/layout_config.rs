use serde::{Deserialize, Serialize};

use crate::core::DisplayTimeZone;
use crate::error::{GanttError, GanttResult};

/// Minimum bar width as a fraction of the window (0.5%).
pub const DEFAULT_WIDTH_FLOOR: f64 = 0.005;
/// Gridline cadence of the time axis.
pub const DEFAULT_MARKER_STEP_HOURS: u32 = 3;

/// Tuning for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Bars never get narrower than this fraction, so zero-length records stay clickable.
    #[serde(default = "default_width_floor")]
    pub width_floor: f64,
    #[serde(default = "default_marker_step_hours")]
    pub marker_step_hours: u32,
    /// Zone used for marker alignment and axis labels.
    #[serde(default)]
    pub timezone: DisplayTimeZone,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_floor: DEFAULT_WIDTH_FLOOR,
            marker_step_hours: DEFAULT_MARKER_STEP_HOURS,
            timezone: DisplayTimeZone::Utc,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn with_width_floor(mut self, width_floor: f64) -> Self {
        self.width_floor = width_floor;
        self
    }

    #[must_use]
    pub fn with_marker_step_hours(mut self, hours: u32) -> Self {
        self.marker_step_hours = hours;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: DisplayTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn validate(self) -> GanttResult<Self> {
        if !self.width_floor.is_finite() || self.width_floor <= 0.0 || self.width_floor > 1.0 {
            return Err(GanttError::InvalidConfig(
                "layout width floor must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !(1..=24).contains(&self.marker_step_hours) {
            return Err(GanttError::InvalidConfig(
                "layout marker step must be between 1 and 24 hours".to_owned(),
            ));
        }
        self.timezone.validate()?;
        Ok(self)
    }
}

fn default_width_floor() -> f64 {
    DEFAULT_WIDTH_FLOOR
}

fn default_marker_step_hours() -> u32 {
    DEFAULT_MARKER_STEP_HOURS
}
