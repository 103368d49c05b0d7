use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::TimeWindow;
use crate::error::{GanttError, GanttResult, UpstreamError};
use crate::schedule::{
    AircraftListResponse, Flight, GroundScheduleResponse, TripScheduleResponse,
    derive_ground_response, derive_trip_response, summarize_fleet,
};

/// Data layer feeding the dashboard.
///
/// Implementations forward the call and relay failures; retries, if any,
/// belong to the implementation.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_aircraft_list(&self) -> Result<AircraftListResponse, UpstreamError>;

    async fn fetch_trip_schedule(
        &self,
        aircraft_ids: &[String],
        window: TimeWindow,
    ) -> Result<TripScheduleResponse, UpstreamError>;

    async fn fetch_ground_schedule(
        &self,
        aircraft_ids: &[String],
        window: TimeWindow,
    ) -> Result<GroundScheduleResponse, UpstreamError>;
}

/// Per-record result of a bulk intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkInsertReport {
    pub created: usize,
    pub failed: usize,
    /// One message per rejected record, numbered from 1 in input order.
    pub errors: Vec<String>,
}

/// Filter and page over the raw flight log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    #[serde(default, rename = "planeId")]
    pub aircraft_id: Option<String>,
    /// Keeps flights overlapping the window, same rule as schedule derivation.
    #[serde(default)]
    pub window: Option<TimeWindow>,
    #[serde(default = "default_query_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for FlightQuery {
    fn default() -> Self {
        Self {
            aircraft_id: None,
            window: None,
            limit: default_query_limit(),
            offset: 0,
        }
    }
}

fn default_query_limit() -> usize {
    100
}

/// One page of [`FlightQuery`] results; `total` counts all matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPage {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub flights: Vec<Flight>,
}

/// Flight log held in memory, answering queries by deriving schedules.
#[derive(Debug, Default)]
pub struct InMemoryScheduleSource {
    flights: RwLock<Vec<Flight>>,
}

impl InMemoryScheduleSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from a batch, rejecting the first invalid or duplicate flight.
    pub fn with_flights(flights: impl IntoIterator<Item = Flight>) -> GanttResult<Self> {
        let source = Self::new();
        for flight in flights {
            source.insert_flight(flight)?;
        }
        Ok(source)
    }

    /// Adds a validated flight.
    ///
    /// An aircraft cannot have two flights departing at the same instant.
    pub fn insert_flight(&self, flight: Flight) -> GanttResult<()> {
        flight.validate()?;
        let mut flights = self.flights.write();
        let duplicate = flights.iter().any(|existing| {
            existing.aircraft_id == flight.aircraft_id && existing.departure == flight.departure
        });
        if duplicate {
            return Err(GanttError::MalformedInput(format!(
                "duplicate flight: aircraft {} already departs at {}",
                flight.aircraft_id, flight.departure
            )));
        }
        flights.push(flight);
        Ok(())
    }

    /// Inserts every flight it can and reports the rest instead of stopping.
    pub fn insert_flights(&self, flights: impl IntoIterator<Item = Flight>) -> BulkInsertReport {
        let mut report = BulkInsertReport::default();
        for (index, flight) in flights.into_iter().enumerate() {
            match self.insert_flight(flight) {
                Ok(()) => report.created += 1,
                Err(err) => {
                    report.failed += 1;
                    report.errors.push(format!("Flight {}: {err}", index + 1));
                }
            }
        }
        if report.failed > 0 {
            warn!(
                created = report.created,
                failed = report.failed,
                "bulk flight intake rejected records"
            );
        }
        report
    }

    /// Flights in insertion order, filtered then paged.
    #[must_use]
    pub fn query_flights(&self, query: &FlightQuery) -> FlightPage {
        let flights = self.flights.read();
        let matching: Vec<&Flight> = flights
            .iter()
            .filter(|f| query.aircraft_id.as_ref().is_none_or(|id| &f.aircraft_id == id))
            .filter(|f| query.window.is_none_or(|window| f.overlaps(window)))
            .collect();
        FlightPage {
            total: matching.len(),
            limit: query.limit,
            offset: query.offset,
            flights: matching
                .into_iter()
                .skip(query.offset)
                .take(query.limit)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.read().is_empty()
    }
}

#[async_trait]
impl ScheduleSource for InMemoryScheduleSource {
    async fn fetch_aircraft_list(&self) -> Result<AircraftListResponse, UpstreamError> {
        Ok(summarize_fleet(&self.flights.read()))
    }

    async fn fetch_trip_schedule(
        &self,
        aircraft_ids: &[String],
        window: TimeWindow,
    ) -> Result<TripScheduleResponse, UpstreamError> {
        let flights = self.flights.read();
        require_aircraft_ids(&flights, aircraft_ids)?;
        Ok(derive_trip_response(&flights, aircraft_ids, window))
    }

    async fn fetch_ground_schedule(
        &self,
        aircraft_ids: &[String],
        window: TimeWindow,
    ) -> Result<GroundScheduleResponse, UpstreamError> {
        let flights = self.flights.read();
        require_aircraft_ids(&flights, aircraft_ids)?;
        Ok(derive_ground_response(&flights, aircraft_ids, window))
    }
}

/// Rejects an empty id list. Unknown ids are allowed and only logged.
fn require_aircraft_ids(flights: &[Flight], aircraft_ids: &[String]) -> Result<(), UpstreamError> {
    if aircraft_ids.is_empty() {
        return Err(UpstreamError::new(Some(400), "planeIds must not be empty"));
    }
    let known: HashSet<&str> = flights.iter().map(|f| f.aircraft_id.as_str()).collect();
    if let Some(unknown) = aircraft_ids.iter().find(|id| !known.contains(id.as_str())) {
        debug!(aircraft = %unknown, "schedule requested for unknown aircraft");
    }
    Ok(())
}
