use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

use super::LayoutOutcome;

pub const LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutJsonContractV1 {
    pub schema_version: u32,
    pub outcome: LayoutOutcome,
}

impl LayoutOutcome {
    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = LayoutJsonContractV1 {
            schema_version: LAYOUT_JSON_SCHEMA_V1,
            outcome: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::MalformedInput(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    /// Accepts either a bare outcome or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(outcome) = serde_json::from_str::<LayoutOutcome>(input) {
            return Ok(outcome);
        }
        let payload: LayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::MalformedInput(format!("failed to parse layout json payload: {e}"))
        })?;
        if payload.schema_version != LAYOUT_JSON_SCHEMA_V1 {
            return Err(GanttError::MalformedInput(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.outcome)
    }
}
