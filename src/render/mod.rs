//! Interval layout engine.
//!
//! Everything here is pure: a window plus rows of intervals go in, fractional
//! bar geometry and axis markers come out. Turning fractions into pixels is
//! left to whatever presentation layer consumes the layout.

mod axis_label_format;
mod bar_layout;
mod json_contract;
mod layout_config;
mod layout_engine;
mod time_markers;

pub use axis_label_format::{format_marker_label, format_window_caption};
pub use bar_layout::BarLayout;
pub use json_contract::{LAYOUT_JSON_SCHEMA_V1, LayoutJsonContractV1};
pub use layout_config::{DEFAULT_MARKER_STEP_HOURS, DEFAULT_WIDTH_FLOOR, LayoutConfig};
pub use layout_engine::{LayoutOutcome, RowLayout, TimelineLayout, compute_layout};
pub use time_markers::{TimeMarker, time_markers};
