use serde::{Deserialize, Serialize};

use crate::core::{TimeWindow, TimelineRow};
use crate::error::GanttResult;
use crate::render::{LayoutConfig, LayoutOutcome, compute_layout};

/// Backend-neutral schedule ready for layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleModel {
    pub title: String,
    pub window: TimeWindow,
    pub rows: Vec<TimelineRow>,
}

impl ScheduleModel {
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.rows.iter().map(|row| row.intervals.len()).sum()
    }

    /// Lays the model out over its own window; the title is carried over.
    pub fn layout(&self, config: LayoutConfig) -> GanttResult<LayoutOutcome> {
        let outcome = compute_layout(self.window, &self.rows, config)?;
        Ok(match outcome {
            LayoutOutcome::Laid(layout) => LayoutOutcome::Laid(layout.with_title(&self.title)),
            LayoutOutcome::NoData => LayoutOutcome::NoData,
        })
    }
}
