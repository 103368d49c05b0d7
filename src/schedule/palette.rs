use serde::{Deserialize, Serialize};

use crate::core::ColorToken;
use crate::error::{GanttError, GanttResult};

pub const TRIP_PALETTE: [&str; 6] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

pub const GROUND_PALETTE: [&str; 6] = [
    "#6366f1", "#14b8a6", "#f97316", "#a855f7", "#06b6d4", "#84cc16",
];

/// How a row picks its palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorAssignment {
    /// `palette[row_index % len]`; colors follow the selection order.
    #[default]
    ByIndex,
    /// Hash of the aircraft id, stable across selections.
    ByIdentity,
}

impl ColorAssignment {
    pub fn pick(
        self,
        palette: &[&str],
        row_index: usize,
        aircraft_id: &str,
    ) -> GanttResult<ColorToken> {
        let slot = match self {
            Self::ByIndex => row_index,
            Self::ByIdentity => identity_slot(aircraft_id),
        };
        if palette.is_empty() {
            return Err(GanttError::InvalidConfig(
                "color palette must not be empty".to_owned(),
            ));
        }
        ColorToken::new(palette[slot % palette.len()])
    }
}

/// FNV-1a over the id bytes; stable across runs and platforms.
fn identity_slot(aircraft_id: &str) -> usize {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let hash = aircraft_id
        .bytes()
        .fold(OFFSET, |acc, byte| (acc ^ u64::from(byte)).wrapping_mul(PRIME));
    (hash % 1_000_003) as usize
}

#[cfg(test)]
mod tests {
    use super::{ColorAssignment, GROUND_PALETTE, TRIP_PALETTE};

    #[test]
    fn index_assignment_wraps_around_palette() {
        let first = ColorAssignment::ByIndex
            .pick(&TRIP_PALETTE, 0, "A")
            .expect("color");
        let seventh = ColorAssignment::ByIndex
            .pick(&TRIP_PALETTE, 6, "G")
            .expect("color");
        assert_eq!(first.as_str(), "#3b82f6");
        assert_eq!(first, seventh);
    }

    #[test]
    fn identity_assignment_ignores_row_position() {
        let at_zero = ColorAssignment::ByIdentity
            .pick(&GROUND_PALETTE, 0, "PLANE_A")
            .expect("color");
        let at_four = ColorAssignment::ByIdentity
            .pick(&GROUND_PALETTE, 4, "PLANE_A")
            .expect("color");
        assert_eq!(at_zero, at_four);
    }
}
