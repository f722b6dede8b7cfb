use serde::{Deserialize, Serialize};

use crate::core::{RegionId, Viewport};
use crate::error::{OverlayError, OverlayResult};
use crate::interaction::PreviewStatus;
use crate::render::{ChartSurface, MapSurface};

use super::InteractionArbiter;

pub const SESSION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the interaction session for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub viewport: Viewport,
    pub clock_ms: u64,
    pub pinned_region: Option<RegionId>,
    pub preview: PreviewStatus,
    pub preview_in_flight: bool,
    pub hovered_region: Option<RegionId>,
    pub detail_chart_regions: Vec<RegionId>,
    pub cached_series: usize,
    pub pending_timers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SessionSnapshotJsonContractV1 {
    schema_version: u32,
    snapshot: SessionSnapshot,
}

impl SessionSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> OverlayResult<String> {
        let payload = SessionSnapshotJsonContractV1 {
            schema_version: SESSION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            OverlayError::InvalidData(format!("failed to serialize session snapshot v1: {e}"))
        })
    }

    /// Accepts a bare snapshot or a v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> OverlayResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SessionSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SessionSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            OverlayError::InvalidData(format!("failed to parse session snapshot payload: {e}"))
        })?;
        if payload.schema_version != SESSION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(OverlayError::InvalidData(format!(
                "unsupported session snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<C: ChartSurface, M: MapSurface> InteractionArbiter<C, M> {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            viewport: self.config.viewport,
            clock_ms: u64::try_from(self.now.as_millis()).unwrap_or(u64::MAX),
            pinned_region: self.detail.open_region().cloned(),
            preview: self.preview.status(),
            preview_in_flight: self.preview.in_flight(),
            hovered_region: self.hovered.clone(),
            detail_chart_regions: self.detail.chart_slots().regions().cloned().collect(),
            cached_series: self.series.len(),
            pending_timers: self.preview.pending_timers(),
        }
    }
}
