use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{AircraftSummary, TimeWindow, duration_minutes};

use super::records::{
    AircraftGroundTime, AircraftListResponse, AircraftTrips, Flight, GroundPeriod,
    GroundScheduleResponse, Trip, TripScheduleResponse,
};

/// Flights of the requested aircraft overlapping `window`.
///
/// Keys follow `aircraft_ids` order (every requested id is present, possibly
/// with no flights); each list is sorted by departure.
#[must_use]
pub fn flights_by_aircraft_in_window(
    flights: &[Flight],
    aircraft_ids: &[String],
    window: TimeWindow,
) -> IndexMap<String, Vec<Flight>> {
    let mut grouped: IndexMap<String, Vec<Flight>> = aircraft_ids
        .iter()
        .map(|id| (id.clone(), Vec::new()))
        .collect();
    for flight in flights.iter().filter(|flight| flight.overlaps(window)) {
        if let Some(bucket) = grouped.get_mut(&flight.aircraft_id) {
            bucket.push(flight.clone());
        }
    }
    for bucket in grouped.values_mut() {
        bucket.sort_by_key(|flight| flight.departure);
    }
    grouped
}

#[must_use]
pub fn trips_title(aircraft_ids: &[String], window: TimeWindow) -> String {
    format!("Trips of {}", title_suffix(aircraft_ids, window))
}

#[must_use]
pub fn ground_title(aircraft_ids: &[String], window: TimeWindow) -> String {
    format!("Ground time of {}", title_suffix(aircraft_ids, window))
}

fn title_suffix(aircraft_ids: &[String], window: TimeWindow) -> String {
    format!(
        "{} from {} to {}",
        aircraft_ids.join(", "),
        window.start().format("%Y-%m-%d"),
        window.end().format("%Y-%m-%d")
    )
}

/// One trip per flight, rows in `aircraft_ids` order.
#[must_use]
pub fn derive_trips(
    aircraft_ids: &[String],
    flights_by_aircraft: &IndexMap<String, Vec<Flight>>,
    window: TimeWindow,
) -> TripScheduleResponse {
    let aircraft = aircraft_ids
        .iter()
        .map(|id| AircraftTrips {
            aircraft_id: id.clone(),
            trips: flights_by_aircraft
                .get(id)
                .map(|flights| flights.iter().map(trip_from_flight).collect())
                .unwrap_or_default(),
        })
        .collect();
    TripScheduleResponse {
        title: trips_title(aircraft_ids, window),
        start: window.start(),
        end: window.end(),
        aircraft,
    }
}

fn trip_from_flight(flight: &Flight) -> Trip {
    Trip {
        id: flight.id,
        route: format!("{}-{}", flight.origin, flight.destination),
        origin: flight.origin.clone(),
        destination: flight.destination.clone(),
        start: flight.departure,
        end: flight.arrival,
        duration_minutes: duration_minutes(flight.departure, flight.arrival),
    }
}

/// Ground gaps around and between each aircraft's flights.
///
/// Aircraft without flights in the window are left out, since their location
/// is unknown.
#[must_use]
pub fn derive_ground_periods(
    aircraft_ids: &[String],
    flights_by_aircraft: &IndexMap<String, Vec<Flight>>,
    window: TimeWindow,
) -> GroundScheduleResponse {
    let aircraft = aircraft_ids
        .iter()
        .filter_map(|id| {
            let flights = flights_by_aircraft.get(id).filter(|f| !f.is_empty());
            let Some(flights) = flights else {
                trace!(aircraft = %id, "no flights in window, skipping ground time");
                return None;
            };
            Some(AircraftGroundTime {
                aircraft_id: id.clone(),
                ground_periods: ground_periods(flights, window),
            })
        })
        .collect();
    GroundScheduleResponse {
        title: ground_title(aircraft_ids, window),
        start: window.start(),
        end: window.end(),
        aircraft,
    }
}

/// `flights` must be non-empty and sorted by departure.
fn ground_periods(flights: &[Flight], window: TimeWindow) -> Vec<GroundPeriod> {
    let mut periods = Vec::new();
    let (Some(first), Some(last)) = (flights.first(), flights.last()) else {
        return periods;
    };

    if first.departure > window.start() {
        periods.push(ground_period(&first.origin, window.start(), first.departure));
    }
    for pair in flights.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        // Back-to-back and overlapping legs leave no ground time.
        if next.departure > current.arrival {
            periods.push(ground_period(
                &current.destination,
                current.arrival,
                next.departure,
            ));
        }
    }
    if last.arrival < window.end() {
        periods.push(ground_period(&last.destination, last.arrival, window.end()));
    }
    periods
}

fn ground_period(location: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> GroundPeriod {
    GroundPeriod {
        location: location.to_owned(),
        start,
        end,
        duration_minutes: duration_minutes(start, end),
    }
}

/// Filters `flights` to the window and derives the trip schedule.
#[must_use]
pub fn derive_trip_response(
    flights: &[Flight],
    aircraft_ids: &[String],
    window: TimeWindow,
) -> TripScheduleResponse {
    let grouped = flights_by_aircraft_in_window(flights, aircraft_ids, window);
    let response = derive_trips(aircraft_ids, &grouped, window);
    debug!(aircraft = response.aircraft.len(), "derived trip schedule");
    response
}

/// Filters `flights` to the window and derives the ground-time schedule.
#[must_use]
pub fn derive_ground_response(
    flights: &[Flight],
    aircraft_ids: &[String],
    window: TimeWindow,
) -> GroundScheduleResponse {
    let grouped = flights_by_aircraft_in_window(flights, aircraft_ids, window);
    let response = derive_ground_periods(aircraft_ids, &grouped, window);
    debug!(aircraft = response.aircraft.len(), "derived ground schedule");
    response
}

/// Per-aircraft flight counts and latest departure, sorted by aircraft id.
#[must_use]
pub fn summarize_fleet(flights: &[Flight]) -> AircraftListResponse {
    let mut summaries: BTreeMap<&str, AircraftSummary> = BTreeMap::new();
    for flight in flights {
        summaries
            .entry(flight.aircraft_id.as_str())
            .and_modify(|summary| {
                summary.total_flights += 1;
                summary.last_flight = summary.last_flight.max(flight.departure);
            })
            .or_insert_with(|| AircraftSummary {
                aircraft_id: flight.aircraft_id.clone(),
                total_flights: 1,
                last_flight: flight.departure,
            });
    }
    AircraftListResponse {
        aircraft: summaries.into_values().collect(),
    }
}
