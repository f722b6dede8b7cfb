mod chart_spec;
mod panel;
mod recording;
mod style;

pub use chart_spec::{ChartKind, ChartSpec};
pub use panel::{DetailPanel, PreviewPanel};
pub use recording::{RecordingChartSurface, RecordingMapSurface, RenderRecord};
pub use style::{ChoroplethPalette, Color, RegionStyle};

use serde::{Deserialize, Serialize};

use crate::core::{Placement, RegionId};
use crate::error::OverlayResult;

/// Owned reference to a chart drawn by a [`ChartSurface`].
///
/// Not `Clone`: exactly one owner holds it, and giving it back through
/// [`ChartSurface::destroy`] is the only way to release the chart.
#[must_use = "chart handles must be passed to ChartSurface::destroy"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    id: u64,
}

impl ChartHandle {
    /// Wraps a surface-assigned identifier. Called by surface implementations.
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Owned reference to a floating preview panel mounted by a [`MapSurface`].
#[must_use = "preview panels must be passed to MapSurface::unmount_preview"]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PanelHandle {
    key: u64,
}

impl PanelHandle {
    pub fn new(key: u64) -> Self {
        Self { key }
    }

    #[must_use]
    pub fn key(&self) -> u64 {
        self.key
    }
}

/// Canvas-like container a chart is drawn into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartTarget {
    PreviewPanel { panel: u64 },
    DetailPanel { region: RegionId },
}

/// Contract implemented by the charting backend.
pub trait ChartSurface {
    fn render(&mut self, target: &ChartTarget, spec: &ChartSpec) -> OverlayResult<ChartHandle>;

    /// Releases the chart. Each handle reaches this method at most once.
    fn destroy(&mut self, handle: ChartHandle);
}

/// Contract implemented by the map layer hosting regions and panels.
pub trait MapSurface {
    fn mount_preview(&mut self, panel: &PreviewPanel) -> OverlayResult<PanelHandle>;

    fn move_preview(&mut self, panel: &PanelHandle, placement: Placement);

    fn unmount_preview(&mut self, panel: PanelHandle);

    /// Removes every preview panel still mounted and returns how many were removed.
    fn sweep_preview_panels(&mut self) -> usize;

    /// Shows the pinned panel bound to the region's feature.
    fn open_detail(&mut self, panel: &DetailPanel);

    /// Creates the chart sub-container inside the open detail panel.
    fn mount_detail_chart_container(&mut self, region: &RegionId) -> OverlayResult<ChartTarget>;

    fn remove_detail_chart_container(&mut self, region: &RegionId);

    fn close_detail(&mut self, region: &RegionId);

    fn set_region_style(&mut self, region: &RegionId, style: RegionStyle);
}
