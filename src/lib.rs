//! fleet-gantt: timeline layout and range selection for aircraft schedules.
//!
//! The crate keeps a strict split between pure computation and orchestration:
//! `render` and `interaction` are synchronous and side-effect free, `schedule`
//! converts backend records into layout rows, and `api` owns the dashboard
//! session state around an asynchronous [`api::ScheduleSource`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod schedule;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardController};
pub use error::{GanttError, GanttResult};
