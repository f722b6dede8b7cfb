use serde::{Deserialize, Serialize};

use crate::core::{Placement, RegionId};

/// Why a scheduled preview ended without a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewSuppression {
    EmptySeries,
    PinActive,
    RegionChanged,
    SurfaceFailure,
}

/// Event stream exposed to observers, in the order transitions happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    PreviewScheduled { region: RegionId },
    PreviewShown { region: RegionId, placement: Placement },
    PreviewMoved { region: RegionId, placement: Placement },
    PreviewSuppressed { region: RegionId, reason: PreviewSuppression },
    PreviewCancelled { region: RegionId },
    PreviewHidden { region: RegionId },
    DetailOpened { region: RegionId },
    DetailChartBuilt { region: RegionId },
    DetailClosed { region: RegionId },
}

/// Extension hook for hosts that want to follow overlay transitions.
///
/// Observers see events after the transition completed and cannot mutate
/// interaction state.
pub trait InteractionObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &InteractionEvent);
}
