use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TimeWindow, TimelineRow, WindowScale};
use crate::error::GanttResult;

use super::axis_label_format::format_window_caption;
use super::bar_layout::{BarLayout, layout_bar};
use super::layout_config::LayoutConfig;
use super::time_markers::{TimeMarker, time_markers};

/// Laid-out bars of one aircraft row, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub id: String,
    pub display_name: String,
    pub bars: Vec<BarLayout>,
}

/// Presentation-neutral Gantt layout for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    #[serde(default)]
    pub title: Option<String>,
    pub window: TimeWindow,
    pub caption: String,
    pub rows: Vec<RowLayout>,
    pub markers: Vec<TimeMarker>,
}

impl TimelineLayout {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.rows.iter().map(|row| row.bars.len()).sum()
    }
}

/// Result of a layout pass.
///
/// An empty row list is reported explicitly instead of as an empty layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "layout", rename_all = "snake_case")]
pub enum LayoutOutcome {
    NoData,
    Laid(TimelineLayout),
}

impl LayoutOutcome {
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    #[must_use]
    pub fn layout(&self) -> Option<&TimelineLayout> {
        match self {
            Self::NoData => None,
            Self::Laid(layout) => Some(layout),
        }
    }

    #[must_use]
    pub fn into_layout(self) -> Option<TimelineLayout> {
        match self {
            Self::NoData => None,
            Self::Laid(layout) => Some(layout),
        }
    }
}

/// Maps rows of intervals onto fractional bar geometry plus axis markers.
///
/// Fails with `InvalidWindow` for a zero-duration window and with
/// `InvalidInterval` for an interval ending before it starts. The function is
/// pure: identical inputs produce identical outputs.
pub fn compute_layout(
    window: TimeWindow,
    rows: &[TimelineRow],
    config: LayoutConfig,
) -> GanttResult<LayoutOutcome> {
    let config = config.validate()?;
    let scale = WindowScale::new(window).inspect_err(|err| {
        warn!(error = %err, "rejecting layout pass");
    })?;

    if rows.is_empty() {
        debug!("layout pass without rows");
        return Ok(LayoutOutcome::NoData);
    }

    let rows = rows
        .iter()
        .map(|row| {
            let bars = row
                .intervals
                .iter()
                .map(|interval| layout_bar(interval, scale, config.width_floor))
                .collect::<GanttResult<Vec<_>>>()?;
            Ok(RowLayout {
                id: row.id.clone(),
                display_name: row.display_name.clone(),
                bars,
            })
        })
        .collect::<GanttResult<Vec<_>>>()?;
    let markers = time_markers(window, config.marker_step_hours, config.timezone)?;

    let layout = TimelineLayout {
        title: None,
        window,
        caption: format_window_caption(window, config.timezone),
        rows,
        markers,
    };
    debug!(
        rows = layout.rows.len(),
        bars = layout.bar_count(),
        markers = layout.markers.len(),
        "computed timeline layout"
    );
    Ok(LayoutOutcome::Laid(layout))
}
