use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AircraftSummary, TimeWindow};
use crate::error::{GanttError, GanttResult};

const MIN_AIRPORT_CODE_LEN: usize = 3;
const MAX_AIRPORT_CODE_LEN: usize = 10;

/// Raw flight leg as recorded for an aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: u64,
    #[serde(rename = "planeId")]
    pub aircraft_id: String,
    pub origin: String,
    pub destination: String,
    #[serde(rename = "departureTime")]
    pub departure: DateTime<Utc>,
    #[serde(rename = "arrivalTime")]
    pub arrival: DateTime<Utc>,
}

impl Flight {
    /// Checks the record the way flight intake does: a non-empty aircraft id,
    /// airport codes of 3 to 10 characters and an arrival strictly after departure.
    pub fn validate(&self) -> GanttResult<()> {
        if self.aircraft_id.trim().is_empty() {
            return Err(GanttError::MalformedInput(format!(
                "flight {} has an empty aircraft id",
                self.id
            )));
        }
        for (field, code) in [("origin", &self.origin), ("destination", &self.destination)] {
            let len = code.chars().count();
            if !(MIN_AIRPORT_CODE_LEN..=MAX_AIRPORT_CODE_LEN).contains(&len) {
                return Err(GanttError::MalformedInput(format!(
                    "flight {} {field} `{code}` must be 3 to 10 characters",
                    self.id
                )));
            }
        }
        if self.arrival <= self.departure {
            return Err(GanttError::MalformedInput(format!(
                "flight {} arrival must be after departure",
                self.id
            )));
        }
        Ok(())
    }

    /// Overlap rule used when querying a window.
    ///
    /// A flight is kept when it departs or arrives inside the window (bounds
    /// inclusive) or spans the whole window.
    #[must_use]
    pub fn overlaps(&self, window: TimeWindow) -> bool {
        window.contains(self.departure)
            || window.contains(self.arrival)
            || (self.departure < window.start() && self.arrival > window.end())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: u64,
    pub route: String,
    pub origin: String,
    pub destination: String,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundPeriod {
    pub location: String,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftTrips {
    #[serde(rename = "planeId")]
    pub aircraft_id: String,
    pub trips: Vec<Trip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftGroundTime {
    #[serde(rename = "planeId")]
    pub aircraft_id: String,
    #[serde(rename = "groundPeriods")]
    pub ground_periods: Vec<GroundPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripScheduleResponse {
    pub title: String,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    #[serde(rename = "planes")]
    pub aircraft: Vec<AircraftTrips>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundScheduleResponse {
    pub title: String,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    #[serde(rename = "planes")]
    pub aircraft: Vec<AircraftGroundTime>,
}

impl TripScheduleResponse {
    pub fn window(&self) -> GanttResult<TimeWindow> {
        TimeWindow::new(self.start, self.end)
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            GanttError::MalformedInput(format!("failed to parse trip schedule: {e}"))
        })
    }
}

impl GroundScheduleResponse {
    pub fn window(&self) -> GanttResult<TimeWindow> {
        TimeWindow::new(self.start, self.end)
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            GanttError::MalformedInput(format!("failed to parse ground schedule: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AircraftListResponse {
    #[serde(rename = "planes")]
    pub aircraft: Vec<AircraftSummary>,
}

#[cfg(test)]
mod tests {
    use super::{Flight, TripScheduleResponse};
    use crate::core::TimeWindow;
    use chrono::{TimeZone, Utc};

    fn flight(dep_hour: u32, arr_hour: u32) -> Flight {
        Flight {
            id: 1,
            aircraft_id: "A".to_owned(),
            origin: "HKG".to_owned(),
            destination: "NRT".to_owned(),
            departure: Utc.with_ymd_and_hms(2022, 1, 1, dep_hour, 0, 0).unwrap(),
            arrival: Utc.with_ymd_and_hms(2022, 1, 1, arr_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn flight_validation_rejects_non_positive_duration() {
        let err = flight(5, 5).validate().expect_err("must fail");
        assert!(format!("{err}").contains("arrival must be after departure"));

        let mut short_code = flight(1, 2);
        short_code.origin = "HK".to_owned();
        assert!(short_code.validate().is_err());
        assert!(flight(1, 2).validate().is_ok());
    }

    #[test]
    fn overlap_keeps_partial_and_spanning_flights() {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2022, 1, 1, 4, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 1, 1, 8, 0, 0).unwrap(),
        )
        .expect("window");
        assert!(flight(2, 5).overlaps(window));
        assert!(flight(7, 10).overlaps(window));
        assert!(flight(1, 10).overlaps(window));
        assert!(flight(8, 9).overlaps(window));
        assert!(!flight(1, 3).overlaps(window));
    }

    #[test]
    fn trip_response_reads_wire_names() {
        let json = r#"{
            "title": "Trips of A from 2022-01-01 to 2022-01-01",
            "startTime": "2022-01-01T00:00:00Z",
            "endTime": "2022-01-01T12:00:00Z",
            "planes": [{"planeId": "A", "trips": [{
                "id": 7, "route": "HKG-NRT", "origin": "HKG", "destination": "NRT",
                "startTime": "2022-01-01T02:00:00Z", "endTime": "2022-01-01T04:00:00Z",
                "durationMinutes": 120
            }]}]
        }"#;
        let response = TripScheduleResponse::from_json_str(json).expect("parse");
        assert_eq!(response.aircraft[0].aircraft_id, "A");
        assert_eq!(response.aircraft[0].trips[0].duration_minutes, 120);
        assert!(response.window().is_ok());
    }
}
