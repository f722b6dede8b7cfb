use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::core::{Placement, RegionId};
use crate::error::{OverlayError, OverlayResult};

use super::{
    ChartHandle, ChartKind, ChartSpec, ChartSurface, ChartTarget, DetailPanel, MapSurface,
    PanelHandle, PreviewPanel, RegionStyle,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub handle_id: u64,
    pub target: ChartTarget,
    pub kind: ChartKind,
    pub point_count: usize,
}

/// Headless chart backend that tracks handle lifecycles.
///
/// Used by tests and headless hosts. Lifecycle misuse (a second live chart on
/// one target, destroying an unknown handle) is recorded in
/// [`RecordingChartSurface::violations`] instead of panicking.
#[derive(Debug, Default)]
pub struct RecordingChartSurface {
    next_id: u64,
    live: IndexMap<u64, ChartTarget>,
    renders: Vec<RenderRecord>,
    destroyed: Vec<u64>,
    violations: Vec<String>,
    fail_renders: bool,
}

impl RecordingChartSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `render` call fail until switched off.
    pub fn set_fail_renders(&mut self, fail: bool) {
        self.fail_renders = fail;
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.len()
    }

    #[must_use]
    pub fn destroy_count(&self) -> usize {
        self.destroyed.len()
    }

    #[must_use]
    pub fn renders(&self) -> &[RenderRecord] {
        &self.renders
    }

    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    pub fn live_targets(&self) -> impl Iterator<Item = &ChartTarget> {
        self.live.values()
    }

    #[must_use]
    pub fn live_count_for(&self, target: &ChartTarget) -> usize {
        self.live.values().filter(|live| *live == target).count()
    }

    #[must_use]
    pub fn render_count_for(&self, target: &ChartTarget) -> usize {
        self.renders
            .iter()
            .filter(|record| record.target == *target)
            .count()
    }
}

impl ChartSurface for RecordingChartSurface {
    fn render(&mut self, target: &ChartTarget, spec: &ChartSpec) -> OverlayResult<ChartHandle> {
        if self.fail_renders {
            return Err(OverlayError::ChartSurface(
                "recording surface configured to fail".to_owned(),
            ));
        }
        if self.live.values().any(|live| live == target) {
            self.violations
                .push(format!("second live chart rendered into {target:?}"));
        }
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(id, target.clone());
        self.renders.push(RenderRecord {
            handle_id: id,
            target: target.clone(),
            kind: spec.kind,
            point_count: spec.values.len(),
        });
        trace!(handle = id, "recorded chart render");
        Ok(ChartHandle::new(id))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        let id = handle.id();
        if self.live.shift_remove(&id).is_none() {
            self.violations
                .push(format!("destroy of unknown chart handle {id}"));
        }
        self.destroyed.push(id);
    }
}

/// Headless map layer that tracks mounted panels and region styles.
#[derive(Debug, Default)]
pub struct RecordingMapSurface {
    next_key: u64,
    previews: IndexMap<u64, PreviewPanel>,
    details: IndexMap<RegionId, DetailPanel>,
    detail_chart_containers: IndexSet<RegionId>,
    styles: IndexMap<RegionId, RegionStyle>,
    preview_moves: usize,
    swept_orphans: usize,
    max_previews: usize,
    max_details: usize,
}

impl RecordingMapSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previews(&self) -> impl Iterator<Item = &PreviewPanel> {
        self.previews.values()
    }

    #[must_use]
    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    #[must_use]
    pub fn detail(&self, region: &RegionId) -> Option<&DetailPanel> {
        self.details.get(region)
    }

    #[must_use]
    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    #[must_use]
    pub fn has_detail_chart_container(&self, region: &RegionId) -> bool {
        self.detail_chart_containers.contains(region)
    }

    #[must_use]
    pub fn style(&self, region: &RegionId) -> Option<&RegionStyle> {
        self.styles.get(region)
    }

    #[must_use]
    pub fn preview_moves(&self) -> usize {
        self.preview_moves
    }

    /// Panels removed by sweeps, i.e. panels nobody unmounted explicitly.
    #[must_use]
    pub fn swept_orphans(&self) -> usize {
        self.swept_orphans
    }

    /// Highest number of simultaneously mounted preview panels seen.
    #[must_use]
    pub fn max_previews(&self) -> usize {
        self.max_previews
    }

    /// Highest number of simultaneously open detail panels seen.
    #[must_use]
    pub fn max_details(&self) -> usize {
        self.max_details
    }
}

impl MapSurface for RecordingMapSurface {
    fn mount_preview(&mut self, panel: &PreviewPanel) -> OverlayResult<PanelHandle> {
        self.next_key += 1;
        self.previews.insert(self.next_key, panel.clone());
        self.max_previews = self.max_previews.max(self.previews.len());
        Ok(PanelHandle::new(self.next_key))
    }

    fn move_preview(&mut self, panel: &PanelHandle, placement: Placement) {
        if let Some(mounted) = self.previews.get_mut(&panel.key()) {
            mounted.placement = placement;
            self.preview_moves += 1;
        }
    }

    fn unmount_preview(&mut self, panel: PanelHandle) {
        self.previews.shift_remove(&panel.key());
    }

    fn sweep_preview_panels(&mut self) -> usize {
        let removed = self.previews.len();
        self.previews.clear();
        self.swept_orphans += removed;
        removed
    }

    fn open_detail(&mut self, panel: &DetailPanel) {
        self.details.insert(panel.region.clone(), panel.clone());
        self.max_details = self.max_details.max(self.details.len());
    }

    fn mount_detail_chart_container(&mut self, region: &RegionId) -> OverlayResult<ChartTarget> {
        if !self.details.contains_key(region) {
            return Err(OverlayError::MapSurface(format!(
                "no open detail panel for `{region}`"
            )));
        }
        self.detail_chart_containers.insert(region.clone());
        Ok(ChartTarget::DetailPanel {
            region: region.clone(),
        })
    }

    fn remove_detail_chart_container(&mut self, region: &RegionId) {
        self.detail_chart_containers.shift_remove(region);
    }

    fn close_detail(&mut self, region: &RegionId) {
        self.details.shift_remove(region);
        self.detail_chart_containers.shift_remove(region);
    }

    fn set_region_style(&mut self, region: &RegionId, style: RegionStyle) {
        self.styles.insert(region.clone(), style);
    }
}
