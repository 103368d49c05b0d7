//! Aircraft schedule records and their conversion into layout rows.
//!
//! Adapters turn trip and ground-time responses into a [`ScheduleModel`];
//! the derivation functions build those responses from raw flights.

mod derive;
mod ground_adapter;
mod model;
mod palette;
mod records;
mod trip_adapter;

pub use derive::{
    derive_ground_periods, derive_ground_response, derive_trip_response, derive_trips,
    flights_by_aircraft_in_window, ground_title, summarize_fleet, trips_title,
};
pub use ground_adapter::{adapt_ground_response, adapt_ground_response_with};
pub use model::ScheduleModel;
pub use palette::{ColorAssignment, GROUND_PALETTE, TRIP_PALETTE};
pub use records::{
    AircraftGroundTime, AircraftListResponse, AircraftTrips, Flight, GroundPeriod,
    GroundScheduleResponse, Trip, TripScheduleResponse,
};
pub use trip_adapter::{adapt_trip_response, adapt_trip_response_with};
