//! Dashboard orchestration over an external schedule source.

mod dashboard_config;
mod dashboard_controller;
mod fetch_ticket;
mod source;

pub use dashboard_config::DashboardConfig;
pub use dashboard_controller::{
    AIRCRAFT_LOAD_FAILED, CHART_LOAD_FAILED, DashboardController, NO_AIRCRAFT_SELECTED,
    NO_VALID_RANGE,
};
pub use fetch_ticket::{ChartView, FetchOutcome, FetchTicket};
pub use source::{
    BulkInsertReport, FlightPage, FlightQuery, InMemoryScheduleSource, ScheduleSource,
};
