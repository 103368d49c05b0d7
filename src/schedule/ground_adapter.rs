use tracing::debug;

use crate::core::{TimeInterval, TimelineRow};
use crate::error::GanttResult;

use super::palette::{ColorAssignment, GROUND_PALETTE};
use super::records::{AircraftGroundTime, GroundScheduleResponse};
use super::ScheduleModel;

/// Converts a ground-time schedule into layout rows, one per aircraft.
pub fn adapt_ground_response(response: &GroundScheduleResponse) -> GanttResult<ScheduleModel> {
    adapt_ground_response_with(response, ColorAssignment::default())
}

pub fn adapt_ground_response_with(
    response: &GroundScheduleResponse,
    assignment: ColorAssignment,
) -> GanttResult<ScheduleModel> {
    let window = response.window()?;
    let rows = response
        .aircraft
        .iter()
        .enumerate()
        .map(|(index, aircraft)| ground_row(aircraft, index, assignment))
        .collect::<GanttResult<Vec<_>>>()?;
    debug!(rows = rows.len(), "adapted ground schedule");
    Ok(ScheduleModel {
        title: response.title.clone(),
        window,
        rows,
    })
}

fn ground_row(
    aircraft: &AircraftGroundTime,
    index: usize,
    assignment: ColorAssignment,
) -> GanttResult<TimelineRow> {
    let color = assignment.pick(&GROUND_PALETTE, index, &aircraft.aircraft_id)?;
    let intervals = aircraft
        .ground_periods
        .iter()
        .enumerate()
        .map(|(position, period)| {
            TimeInterval::new(
                format!("{}-ground-{position}", aircraft.aircraft_id),
                format!("Ground at {}", period.location),
                period.start,
                period.end,
                format!(
                    "Ground time at {}\nDuration: {} min",
                    period.location, period.duration_minutes
                ),
                color.clone(),
            )
        })
        .collect::<GanttResult<Vec<_>>>()?;
    Ok(TimelineRow::new(&aircraft.aircraft_id, &aircraft.aircraft_id).with_intervals(intervals))
}
