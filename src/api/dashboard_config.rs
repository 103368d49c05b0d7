use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimeWindow;
use crate::error::{GanttError, GanttResult};
use crate::interaction::{RangePolicy, ensure_window};
use crate::render::LayoutConfig;

use super::ChartView;

/// Dashboard settings, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_window")]
    pub default_window: TimeWindow,
    #[serde(default)]
    pub default_view: ChartView,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub range: RangePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_window: default_window(),
            default_view: ChartView::default(),
            layout: LayoutConfig::default(),
            range: RangePolicy::default(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_default_window(mut self, window: TimeWindow) -> Self {
        self.default_window = window;
        self
    }

    #[must_use]
    pub fn with_default_view(mut self, view: ChartView) -> Self {
        self.default_view = view;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: RangePolicy) -> Self {
        self.range = range;
        self
    }

    /// Validates nested configs; the default window must fit the range policy.
    pub fn validate(self) -> GanttResult<Self> {
        let layout = self.layout.validate()?;
        let range = self.range.validate()?;
        ensure_window(self.default_window.start(), self.default_window.end(), range).map_err(
            |e| GanttError::InvalidConfig(format!("default window is not selectable: {e}")),
        )?;
        Ok(Self {
            layout,
            range,
            ..self
        })
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidConfig(format!("failed to parse dashboard config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidConfig(format!("failed to serialize dashboard config: {e}"))
        })
    }
}

fn default_window() -> TimeWindow {
    let start = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).single();
    let end = Utc.with_ymd_and_hms(2022, 1, 3, 23, 59, 59).single();
    start
        .zip(end)
        .and_then(|(start, end)| TimeWindow::new(start, end).ok())
        .unwrap_or_default()
}
