use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Visible time span `[start, end]` being laid out or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTimeWindow")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeWindow> for TimeWindow {
    type Error = GanttError;

    fn try_from(raw: RawTimeWindow) -> GanttResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// Builds a window; `end` may equal `start` but never precede it.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GanttResult<Self> {
        if end < start {
            return Err(GanttError::InvalidWindow {
                start,
                end,
                reason: "end precedes start",
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.end - self.start
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// `#rrggbb` color token attached to a bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(value: impl Into<String>) -> GanttResult<Self> {
        let value = value.into();
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[0] == b'#'
            && bytes[1..].iter().all(u8::is_ascii_hexdigit);
        if !well_formed {
            return Err(GanttError::MalformedInput(format!(
                "color `{value}` must be a #rrggbb hex token"
            )));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColorToken {
    type Error = GanttError;

    fn try_from(value: String) -> GanttResult<Self> {
        Self::new(value)
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for ColorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One time-bounded record drawn as a bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub id: String,
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tooltip: String,
    pub color: ColorToken,
}

impl TimeInterval {
    /// Builds a validated interval.
    ///
    /// Invariant: `start <= end`.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        tooltip: impl Into<String>,
        color: ColorToken,
    ) -> GanttResult<Self> {
        let interval = Self {
            id: id.into(),
            label: label.into(),
            start,
            end,
            tooltip: tooltip.into(),
            color,
        };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> GanttResult<()> {
        if self.end < self.start {
            return Err(GanttError::InvalidInterval {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// One aircraft's ordered collection of intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub id: String,
    pub display_name: String,
    pub intervals: Vec<TimeInterval>,
}

impl TimelineRow {
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            intervals: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_intervals(mut self, intervals: Vec<TimeInterval>) -> Self {
        self.intervals = intervals;
        self
    }
}

/// Entry of the aircraft selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftSummary {
    #[serde(rename = "planeId")]
    pub aircraft_id: String,
    pub total_flights: u32,
    pub last_flight: DateTime<Utc>,
}
