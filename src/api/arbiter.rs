use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::RegionCatalog;
use crate::core::{RegionId, Series, Viewport};
use crate::error::{OverlayError, OverlayResult};
use crate::extensions::{InteractionEvent, InteractionObserver};
use crate::interaction::{DetailController, PreviewController, PreviewGate, PreviewStatus};
use crate::render::{ChartSurface, ChoroplethPalette, MapSurface};
use crate::series::{SeriesCache, SeriesProvider};

use super::OverlayConfig;

/// Single authority over preview and detail modes.
///
/// `InteractionArbiter` owns the session state, both controllers and the
/// two host collaborators. Pointer notifications go in through the
/// `on_*` methods; time goes in through [`InteractionArbiter::advance_time`].
pub struct InteractionArbiter<C: ChartSurface, M: MapSurface> {
    pub(super) charts: C,
    pub(super) map: M,
    pub(super) config: OverlayConfig,
    pub(super) series: SeriesCache,
    pub(super) palette: ChoroplethPalette,
    pub(super) preview: PreviewController,
    pub(super) detail: DetailController,
    pub(super) hovered: Option<RegionId>,
    pub(super) now: Duration,
    pub(super) observers: Vec<Box<dyn InteractionObserver>>,
    pub(super) events: Vec<InteractionEvent>,
}

impl<C: ChartSurface, M: MapSurface> InteractionArbiter<C, M> {
    pub fn new(
        charts: C,
        map: M,
        provider: Box<dyn SeriesProvider>,
        config: OverlayConfig,
    ) -> OverlayResult<Self> {
        config.validate()?;
        let preview = PreviewController::new(config.preview, config.detail.metric_label.clone());
        let detail = DetailController::new(config.detail.clone(), config.trend);
        Ok(Self {
            charts,
            map,
            series: SeriesCache::new(provider),
            palette: ChoroplethPalette::default(),
            preview,
            detail,
            hovered: None,
            now: Duration::ZERO,
            observers: Vec::new(),
            events: Vec::new(),
            config,
        })
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ChoroplethPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> OverlayResult<()> {
        if !viewport.is_valid() {
            return Err(OverlayError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    /// Last time passed to [`Self::advance_time`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pinned_region(&self) -> Option<&RegionId> {
        self.detail.open_region()
    }

    #[must_use]
    pub fn preview_region(&self) -> Option<&RegionId> {
        self.preview.region()
    }

    #[must_use]
    pub fn preview_status(&self) -> PreviewStatus {
        self.preview.status()
    }

    #[must_use]
    pub fn preview_in_flight(&self) -> bool {
        self.preview.in_flight()
    }

    #[must_use]
    pub fn hovered_region(&self) -> Option<&RegionId> {
        self.hovered.as_ref()
    }

    #[must_use]
    pub fn has_detail_chart(&self, region: &RegionId) -> bool {
        self.detail.has_chart(region)
    }

    /// Earliest pending preview deadline, for hosts that arm a real timer.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.preview.next_deadline()
    }

    /// Advances the session clock and runs every preview due by `now`.
    ///
    /// Time never moves backwards; an earlier `now` only runs what is due
    /// at the current clock.
    pub fn advance_time(&mut self, now: Duration) {
        if now < self.now {
            warn!(?now, clock = ?self.now, "ignoring backwards clock step");
        } else {
            self.now = now;
        }
        let gate = PreviewGate {
            pin_active: self.detail.is_open(),
            hovered: self.hovered.as_ref(),
        };
        self.preview.run_due(
            self.now,
            gate,
            &mut self.series,
            self.config.viewport,
            &mut self.charts,
            &mut self.map,
            &mut self.events,
        );
        self.flush_events();
    }

    /// Series of `region`, computed on first access and cached for the session.
    pub fn series_for(&mut self, region: &RegionId) -> &Series {
        self.series.series_for(region)
    }

    /// Forgets cached series; regions recompute on their next interaction.
    pub fn reset_series_cache(&mut self) {
        self.series.reset();
    }

    /// Applies the base choropleth style to every catalog region.
    pub fn style_catalog(&mut self, catalog: &RegionCatalog) {
        for id in catalog.ids() {
            let latest = self.series.series_for(id).latest_rate();
            self.map.set_region_style(id, self.palette.style_for(latest));
        }
        debug!(regions = catalog.len(), "applied base region styles");
    }

    #[must_use]
    pub fn chart_surface(&self) -> &C {
        &self.charts
    }

    pub fn chart_surface_mut(&mut self) -> &mut C {
        &mut self.charts
    }

    #[must_use]
    pub fn map_surface(&self) -> &M {
        &self.map
    }

    pub fn map_surface_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Tears down preview and detail, then hands the collaborators back.
    #[must_use]
    pub fn into_surfaces(mut self) -> (C, M) {
        self.preview
            .teardown(&mut self.charts, &mut self.map, &mut self.events);
        self.detail
            .close(false, &mut self.charts, &mut self.map, &mut self.events);
        self.flush_events();
        (self.charts, self.map)
    }
}
