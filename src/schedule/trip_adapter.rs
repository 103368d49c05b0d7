use tracing::debug;

use crate::core::{TimeInterval, TimelineRow};
use crate::error::GanttResult;

use super::palette::{ColorAssignment, TRIP_PALETTE};
use super::records::{AircraftTrips, Trip, TripScheduleResponse};
use super::ScheduleModel;

/// Converts a trip schedule into layout rows, one per aircraft, in response order.
pub fn adapt_trip_response(response: &TripScheduleResponse) -> GanttResult<ScheduleModel> {
    adapt_trip_response_with(response, ColorAssignment::default())
}

pub fn adapt_trip_response_with(
    response: &TripScheduleResponse,
    assignment: ColorAssignment,
) -> GanttResult<ScheduleModel> {
    let window = response.window()?;
    let rows = response
        .aircraft
        .iter()
        .enumerate()
        .map(|(index, aircraft)| trip_row(aircraft, index, assignment))
        .collect::<GanttResult<Vec<_>>>()?;
    debug!(rows = rows.len(), "adapted trip schedule");
    Ok(ScheduleModel {
        title: response.title.clone(),
        window,
        rows,
    })
}

fn trip_row(
    aircraft: &AircraftTrips,
    index: usize,
    assignment: ColorAssignment,
) -> GanttResult<TimelineRow> {
    let color = assignment.pick(&TRIP_PALETTE, index, &aircraft.aircraft_id)?;
    let intervals = aircraft
        .trips
        .iter()
        .map(|trip| {
            TimeInterval::new(
                format!("{}-{}", aircraft.aircraft_id, trip.id),
                trip.route.clone(),
                trip.start,
                trip.end,
                trip_tooltip(trip),
                color.clone(),
            )
        })
        .collect::<GanttResult<Vec<_>>>()?;
    Ok(TimelineRow::new(&aircraft.aircraft_id, &aircraft.aircraft_id).with_intervals(intervals))
}

fn trip_tooltip(trip: &Trip) -> String {
    format!(
        "{}\n{} → {}\nDuration: {} min",
        trip.route, trip.origin, trip.destination, trip.duration_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::{adapt_trip_response, adapt_trip_response_with};
    use crate::schedule::{AircraftTrips, ColorAssignment, Trip, TripScheduleResponse};
    use chrono::{TimeZone, Utc};

    fn response(aircraft: &[&str]) -> TripScheduleResponse {
        TripScheduleResponse {
            title: "Trips".to_owned(),
            start: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap(),
            aircraft: aircraft
                .iter()
                .map(|id| AircraftTrips {
                    aircraft_id: (*id).to_owned(),
                    trips: vec![Trip {
                        id: 7,
                        route: "HKG-NRT".to_owned(),
                        origin: "HKG".to_owned(),
                        destination: "NRT".to_owned(),
                        start: Utc.with_ymd_and_hms(2022, 1, 1, 2, 0, 0).unwrap(),
                        end: Utc.with_ymd_and_hms(2022, 1, 1, 4, 0, 0).unwrap(),
                        duration_minutes: 120,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn trip_bar_fields_follow_naming_rules() {
        let model = adapt_trip_response(&response(&["A"])).expect("model");
        let interval = &model.rows[0].intervals[0];
        assert_eq!(interval.id, "A-7");
        assert_eq!(interval.label, "HKG-NRT");
        assert_eq!(interval.tooltip, "HKG-NRT\nHKG → NRT\nDuration: 120 min");
        assert_eq!(interval.color.as_str(), "#3b82f6");
    }

    #[test]
    fn second_row_takes_second_palette_entry() {
        let model = adapt_trip_response(&response(&["A", "B"])).expect("model");
        assert_eq!(model.rows[1].id, "B");
        assert_eq!(model.rows[1].intervals[0].color.as_str(), "#10b981");
    }

    #[test]
    fn identity_colors_survive_reordering() {
        let forward = adapt_trip_response_with(&response(&["A", "B"]), ColorAssignment::ByIdentity)
            .expect("model");
        let reversed = adapt_trip_response_with(&response(&["B", "A"]), ColorAssignment::ByIdentity)
            .expect("model");
        assert_eq!(forward.rows[0].intervals[0].color, reversed.rows[1].intervals[0].color);
    }
}
