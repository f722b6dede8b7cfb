use tracing::trace;

use crate::core::{PointerPosition, RegionId};
use crate::render::{ChartSurface, MapSurface};

use super::InteractionArbiter;

impl<C: ChartSurface, M: MapSurface> InteractionArbiter<C, M> {
    /// Pins `region`.
    ///
    /// Clicking the pinned region again does nothing. Another pinned region
    /// is closed first, and any preview is torn down before the pin opens.
    pub fn on_region_clicked(&mut self, region: &RegionId) {
        if self.detail.open_region() == Some(region) {
            trace!(region = %region, "region already pinned");
            return;
        }
        if self.detail.is_open() {
            self.detail
                .close(false, &mut self.charts, &mut self.map, &mut self.events);
        }
        self.preview
            .teardown(&mut self.charts, &mut self.map, &mut self.events);

        let series = self.series.series_for(region);
        self.detail.open(
            region,
            series,
            &mut self.charts,
            &mut self.map,
            &mut self.events,
        );
        self.flush_events();
    }

    /// Closes the pinned region, if any.
    pub fn on_map_background_clicked(&mut self) {
        self.detail
            .close(false, &mut self.charts, &mut self.map, &mut self.events);
        self.flush_events();
    }

    /// Highlights `region` and, unless a region is pinned, schedules its preview.
    pub fn on_region_hover_start(&mut self, region: &RegionId, pointer: PointerPosition) {
        self.hovered = Some(region.clone());
        self.apply_region_style(region, true);

        if self.detail.is_open() {
            trace!(region = %region, "preview suppressed while a region is pinned");
            self.flush_events();
            return;
        }
        self.preview.request(
            region,
            pointer,
            self.now,
            &mut self.charts,
            &mut self.map,
            &mut self.events,
        );
        self.flush_events();
    }

    /// Moves the preview of `region` with the pointer; never rebuilds its chart.
    pub fn on_region_hover_move(&mut self, region: &RegionId, pointer: PointerPosition) {
        if self.detail.is_open() || self.preview.region() != Some(region) {
            return;
        }
        self.preview.reposition(
            region,
            pointer,
            self.config.viewport,
            &mut self.map,
            &mut self.events,
        );
        self.flush_events();
    }

    /// Restores the region style and tears down any preview immediately.
    pub fn on_region_hover_end(&mut self, region: &RegionId) {
        if self.hovered.as_ref() == Some(region) {
            self.hovered = None;
        }
        self.apply_region_style(region, false);
        self.preview
            .teardown(&mut self.charts, &mut self.map, &mut self.events);
        self.flush_events();
    }

    /// The detail panel of `region` reported that it opened.
    ///
    /// Previews never coexist with a visible detail panel. The chart is
    /// rebuilt only when none is tracked for the pinned region.
    pub fn on_detail_panel_opened(&mut self, region: &RegionId) {
        self.preview
            .teardown(&mut self.charts, &mut self.map, &mut self.events);
        let series = self.series.series_for(region);
        self.detail.notify_opened(
            region,
            series,
            &mut self.charts,
            &mut self.map,
            &mut self.events,
        );
        self.flush_events();
    }

    /// The user closed the detail panel of `region` with its own close control.
    pub fn on_detail_panel_dismissed(&mut self, region: &RegionId) {
        if self.detail.open_region() != Some(region) {
            trace!(region = %region, "dismissal for region that is not pinned");
            return;
        }
        self.detail
            .close(true, &mut self.charts, &mut self.map, &mut self.events);
        self.flush_events();
    }

    fn apply_region_style(&mut self, region: &RegionId, highlighted: bool) {
        let latest = self.series.series_for(region).latest_rate();
        let style = self.palette.style_for(latest);
        let style = if highlighted {
            style.highlighted()
        } else {
            style
        };
        self.map.set_region_style(region, style);
    }
}
