pub mod primitives;
pub mod scale;
pub mod time_zone;
pub mod types;

pub use primitives::{duration_minutes, parse_instant};
pub use scale::WindowScale;
pub use time_zone::DisplayTimeZone;
pub use types::{AircraftSummary, ColorToken, TimeInterval, TimeWindow, TimelineRow};
