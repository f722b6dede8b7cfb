use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::api::{DetailConfig, TrendConfig};
use crate::core::{RegionId, Series};
use crate::extensions::InteractionEvent;
use crate::render::{ChartHandle, ChartSpec, ChartSurface, DetailPanel, MapSurface};

/// Chart handles keyed by region, destroying a displaced handle on overwrite.
#[derive(Debug, Default)]
pub struct ChartSlots {
    slots: IndexMap<RegionId, ChartHandle>,
}

impl ChartSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handle` for `region`. Returns `true` when an older handle was
    /// displaced (and destroyed).
    pub fn install<C: ChartSurface>(
        &mut self,
        charts: &mut C,
        region: RegionId,
        handle: ChartHandle,
    ) -> bool {
        match self.slots.insert(region, handle) {
            Some(displaced) => {
                charts.destroy(displaced);
                true
            }
            None => false,
        }
    }

    /// Destroys and forgets the chart of `region`. Returns `true` when one existed.
    pub fn release<C: ChartSurface>(&mut self, charts: &mut C, region: &RegionId) -> bool {
        match self.slots.shift_remove(region) {
            Some(handle) => {
                charts.destroy(handle);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, region: &RegionId) -> bool {
        self.slots.contains_key(region)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionId> {
        self.slots.keys()
    }
}

/// Owns the pinned detail panel. At most one region is open at a time.
#[derive(Debug)]
pub struct DetailController {
    config: DetailConfig,
    trend: TrendConfig,
    open: Option<RegionId>,
    charts: ChartSlots,
}

impl DetailController {
    #[must_use]
    pub fn new(config: DetailConfig, trend: TrendConfig) -> Self {
        Self {
            config,
            trend,
            open: None,
            charts: ChartSlots::new(),
        }
    }

    #[must_use]
    pub fn open_region(&self) -> Option<&RegionId> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn has_chart(&self, region: &RegionId) -> bool {
        self.charts.contains(region)
    }

    #[must_use]
    pub fn chart_slots(&self) -> &ChartSlots {
        &self.charts
    }

    /// Pins `region`: shows its summary panel and builds its chart.
    ///
    /// The caller closes any other open region first.
    pub fn open<C: ChartSurface, M: MapSurface>(
        &mut self,
        region: &RegionId,
        series: &Series,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        let panel = DetailPanel::build(region, series, &self.config, self.trend);
        map.open_detail(&panel);
        self.open = Some(region.clone());
        debug!(region = %region, trend = %panel.trend, "detail opened");
        events.push(InteractionEvent::DetailOpened {
            region: region.clone(),
        });
        self.rebuild_chart(region, series, charts, map, events);
    }

    /// Handles the panel's own "opened" notification.
    ///
    /// Builds the chart only when none is tracked for the open region.
    pub fn notify_opened<C: ChartSurface, M: MapSurface>(
        &mut self,
        region: &RegionId,
        series: &Series,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        if self.open.as_ref() != Some(region) {
            trace!(region = %region, "opened notification for region that is not pinned");
            return;
        }
        if self.charts.contains(region) {
            trace!(region = %region, "detail chart already tracked");
            return;
        }
        self.rebuild_chart(region, series, charts, map, events);
    }

    /// Unpins the open region, destroying its chart before the pin is cleared.
    ///
    /// `dismissed` marks a panel the user already closed, so only its chart
    /// container is cleaned up.
    pub fn close<C: ChartSurface, M: MapSurface>(
        &mut self,
        dismissed: bool,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) -> Option<RegionId> {
        let region = self.open.clone()?;
        self.charts.release(charts, &region);
        map.remove_detail_chart_container(&region);
        if !dismissed {
            map.close_detail(&region);
        }
        self.open = None;
        debug!(region = %region, dismissed, "detail closed");
        events.push(InteractionEvent::DetailClosed {
            region: region.clone(),
        });
        Some(region)
    }

    fn rebuild_chart<C: ChartSurface, M: MapSurface>(
        &mut self,
        region: &RegionId,
        series: &Series,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        if self.charts.release(charts, region) {
            map.remove_detail_chart_container(region);
        }
        let Some(spec) = ChartSpec::detail(region, series, &self.config) else {
            debug!(region = %region, "no series data, detail shows fallback text");
            return;
        };
        let target = match map.mount_detail_chart_container(region) {
            Ok(target) => target,
            Err(err) => {
                warn!(region = %region, error = %err, "failed to mount detail chart container");
                return;
            }
        };
        match charts.render(&target, &spec) {
            Ok(handle) => {
                self.charts.install(charts, region.clone(), handle);
                events.push(InteractionEvent::DetailChartBuilt {
                    region: region.clone(),
                });
            }
            Err(err) => {
                warn!(region = %region, error = %err, "failed to render detail chart");
                map.remove_detail_chart_container(region);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ChartTarget, RecordingChartSurface};

    fn render(charts: &mut RecordingChartSurface, region: &str) -> ChartHandle {
        let series = Series::from_pairs([(2000, 1.5), (2020, 1.2)]).expect("valid series");
        let spec = ChartSpec::preview(&series, "TFR").expect("chart");
        charts
            .render(
                &ChartTarget::DetailPanel {
                    region: RegionId::from(region),
                },
                &spec,
            )
            .expect("render")
    }

    #[test]
    fn install_destroys_displaced_handle() {
        let mut charts = RecordingChartSurface::new();
        let mut slots = ChartSlots::new();
        let region = RegionId::from("Peru");

        let first = render(&mut charts, "Peru");
        assert!(!slots.install(&mut charts, region.clone(), first));
        let second = render(&mut charts, "Peru-2");
        assert!(slots.install(&mut charts, region.clone(), second));

        assert_eq!(slots.len(), 1);
        assert_eq!(charts.live_count(), 1);
        assert_eq!(charts.destroy_count(), 1);
    }

    #[test]
    fn release_is_a_no_op_for_unknown_regions() {
        let mut charts = RecordingChartSurface::new();
        let mut slots = ChartSlots::new();
        let handle = render(&mut charts, "Peru");
        slots.install(&mut charts, RegionId::from("Peru"), handle);

        assert!(!slots.release(&mut charts, &RegionId::from("Chile")));
        assert!(slots.release(&mut charts, &RegionId::from("Peru")));
        assert!(slots.is_empty());
        assert!(charts.violations().is_empty());
    }
}
