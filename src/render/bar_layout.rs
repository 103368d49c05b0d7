use serde::{Deserialize, Serialize};

use crate::core::{ColorToken, TimeInterval, WindowScale};
use crate::error::GanttResult;

/// Fractional geometry of one bar.
///
/// Bars are not clipped at the right edge: an interval running past the
/// window end yields `left_fraction + width_fraction > 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub color: ColorToken,
    pub left_fraction: f64,
    pub width_fraction: f64,
}

impl BarLayout {
    #[must_use]
    pub fn right_fraction(&self) -> f64 {
        self.left_fraction + self.width_fraction
    }

    #[must_use]
    pub fn overflows_window(&self) -> bool {
        self.right_fraction() > 1.0
    }

    #[must_use]
    pub fn left_percent(&self) -> f64 {
        self.left_fraction * 100.0
    }

    #[must_use]
    pub fn width_percent(&self) -> f64 {
        self.width_fraction * 100.0
    }
}

pub(super) fn layout_bar(
    interval: &TimeInterval,
    scale: WindowScale,
    width_floor: f64,
) -> GanttResult<BarLayout> {
    interval.validate()?;

    let left_fraction = scale.instant_to_fraction(interval.start).max(0.0);
    let width_fraction = scale
        .duration_to_fraction(interval.duration())
        .max(width_floor);

    Ok(BarLayout {
        id: interval.id.clone(),
        label: interval.label.clone(),
        tooltip: interval.tooltip.clone(),
        color: interval.color.clone(),
        left_fraction,
        width_fraction,
    })
}
