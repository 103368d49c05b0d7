use serde::{Deserialize, Serialize};

use crate::core::TimeWindow;

/// Which schedule the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartView {
    #[default]
    Trips,
    GroundTime,
}

/// Handle for one in-flight schedule request.
///
/// Carries the request parameters captured when the fetch began. Only the
/// ticket with the latest generation may apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub(super) generation: u64,
    pub view: ChartView,
    pub aircraft_ids: Vec<String>,
    pub window: TimeWindow,
}

impl FetchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    Applied,
    /// Superseded by a newer request or selection change; the result was dropped.
    Stale,
    /// The source or adapter failed; the view's model was cleared.
    Failed,
}
