use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::api::PreviewConfig;
use crate::core::{Placement, PointerPosition, RegionId, Viewport, place};
use crate::extensions::{InteractionEvent, PreviewSuppression};
use crate::render::{
    ChartHandle, ChartSpec, ChartSurface, ChartTarget, MapSurface, PanelHandle, PreviewPanel,
};
use crate::series::SeriesCache;

use super::{TimerId, TimerQueue};

/// Cancellation token carried by a scheduled preview.
///
/// Any teardown bumps the controller generation, so a ticket minted before
/// it no longer matches when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviewTicket {
    generation: u64,
}

#[derive(Debug)]
enum PreviewPhase {
    Idle,
    Scheduled {
        region: RegionId,
        pointer: PointerPosition,
        timer: TimerId,
        generation: u64,
    },
    Active {
        region: RegionId,
        panel: PanelHandle,
        chart: ChartHandle,
        placement: Placement,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewStatus {
    Idle,
    Scheduled { region: RegionId },
    Active { region: RegionId },
}

impl PreviewStatus {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Session facts a due preview re-checks before it builds anything.
#[derive(Debug, Clone, Copy)]
pub struct PreviewGate<'a> {
    pub pin_active: bool,
    pub hovered: Option<&'a RegionId>,
}

/// Owns the floating hover preview: `Idle -> Scheduled -> Active -> Idle`.
#[derive(Debug)]
pub struct PreviewController {
    config: PreviewConfig,
    metric_label: String,
    phase: PreviewPhase,
    timers: TimerQueue<PreviewTicket>,
    generation: u64,
}

impl PreviewController {
    #[must_use]
    pub fn new(config: PreviewConfig, metric_label: impl Into<String>) -> Self {
        Self {
            config,
            metric_label: metric_label.into(),
            phase: PreviewPhase::Idle,
            timers: TimerQueue::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> PreviewStatus {
        match &self.phase {
            PreviewPhase::Idle => PreviewStatus::Idle,
            PreviewPhase::Scheduled { region, .. } => PreviewStatus::Scheduled {
                region: region.clone(),
            },
            PreviewPhase::Active { region, .. } => PreviewStatus::Active {
                region: region.clone(),
            },
        }
    }

    /// Region being previewed, whether still scheduled or already shown.
    #[must_use]
    pub fn region(&self) -> Option<&RegionId> {
        match &self.phase {
            PreviewPhase::Idle => None,
            PreviewPhase::Scheduled { region, .. } | PreviewPhase::Active { region, .. } => {
                Some(region)
            }
        }
    }

    /// `true` between a preview request and its construction.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        matches!(self.phase, PreviewPhase::Scheduled { .. })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, PreviewPhase::Active { .. })
    }

    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        match &self.phase {
            PreviewPhase::Active { placement, .. } => Some(*placement),
            PreviewPhase::Idle | PreviewPhase::Scheduled { .. } => None,
        }
    }

    /// Debounce timers still queued.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Schedules a preview for `region`, debounced from `now`.
    ///
    /// A request for the region already scheduled or shown is ignored. A
    /// preview of another region is torn down first.
    pub fn request<C: ChartSurface, M: MapSurface>(
        &mut self,
        region: &RegionId,
        pointer: PointerPosition,
        now: Duration,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        if self.region() == Some(region) {
            trace!(region = %region, "preview already requested for region");
            return;
        }
        self.teardown(charts, map, events);

        let deadline = now + Duration::from_millis(self.config.debounce_ms);
        let generation = self.generation;
        let timer = self.timers.schedule(deadline, PreviewTicket { generation });
        let deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
        trace!(region = %region, deadline_ms, "preview scheduled");
        self.phase = PreviewPhase::Scheduled {
            region: region.clone(),
            pointer,
            timer,
            generation,
        };
        events.push(InteractionEvent::PreviewScheduled {
            region: region.clone(),
        });
    }

    /// Follows the pointer within `region` without rebuilding the chart.
    pub fn reposition<M: MapSurface>(
        &mut self,
        region: &RegionId,
        pointer: PointerPosition,
        viewport: Viewport,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        let size = self.config.panel_size();
        let offsets = self.config.placement_offsets();
        match &mut self.phase {
            PreviewPhase::Scheduled {
                region: scheduled,
                pointer: last_pointer,
                ..
            } if scheduled == region => {
                *last_pointer = pointer;
            }
            PreviewPhase::Active {
                region: active,
                panel,
                placement,
                ..
            } if active == region => {
                let next = place(pointer, size, viewport, offsets);
                if next != *placement {
                    map.move_preview(panel, next);
                    *placement = next;
                    events.push(InteractionEvent::PreviewMoved {
                        region: region.clone(),
                        placement: next,
                    });
                }
            }
            _ => {}
        }
    }

    /// Fires every timer due at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn run_due<C: ChartSurface, M: MapSurface>(
        &mut self,
        now: Duration,
        gate: PreviewGate<'_>,
        series: &mut SeriesCache,
        viewport: Viewport,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        while let Some((timer, ticket)) = self.timers.pop_due(now) {
            self.fire(timer, ticket, gate, series, viewport, charts, map, events);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fire<C: ChartSurface, M: MapSurface>(
        &mut self,
        timer: TimerId,
        ticket: PreviewTicket,
        gate: PreviewGate<'_>,
        series: &mut SeriesCache,
        viewport: Viewport,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        let current = matches!(
            &self.phase,
            PreviewPhase::Scheduled { timer: scheduled, generation, .. }
                if *scheduled == timer && *generation == ticket.generation
        );
        if !current || ticket.generation != self.generation {
            trace!(generation = ticket.generation, "dropping stale preview timer");
            return;
        }
        let PreviewPhase::Scheduled { region, pointer, .. } =
            std::mem::replace(&mut self.phase, PreviewPhase::Idle)
        else {
            return;
        };

        if gate.pin_active {
            suppress(events, region, PreviewSuppression::PinActive);
            return;
        }
        if gate.hovered != Some(&region) {
            suppress(events, region, PreviewSuppression::RegionChanged);
            return;
        }

        let region_series = series.series_for(&region);
        let Some(spec) = ChartSpec::preview(region_series, &self.metric_label) else {
            debug!(region = %region, "no series data, preview suppressed");
            suppress(events, region, PreviewSuppression::EmptySeries);
            return;
        };

        let size = self.config.panel_size();
        let placement = place(pointer, size, viewport, self.config.placement_offsets());
        let panel_spec = PreviewPanel {
            region: region.clone(),
            title: PreviewPanel::title_for(&region, region_series, &self.metric_label),
            placement,
            size,
            padding: self.config.padding,
            title_height: self.config.title_height,
            chart_height: self.config.chart_height,
        };
        let panel = match map.mount_preview(&panel_spec) {
            Ok(panel) => panel,
            Err(err) => {
                warn!(region = %region, error = %err, "failed to mount preview panel");
                suppress(events, region, PreviewSuppression::SurfaceFailure);
                return;
            }
        };
        let target = ChartTarget::PreviewPanel { panel: panel.key() };
        let chart = match charts.render(&target, &spec) {
            Ok(chart) => chart,
            Err(err) => {
                warn!(region = %region, error = %err, "failed to render preview chart");
                map.unmount_preview(panel);
                suppress(events, region, PreviewSuppression::SurfaceFailure);
                return;
            }
        };

        debug!(region = %region, left = placement.left, top = placement.top, "preview shown");
        events.push(InteractionEvent::PreviewShown {
            region: region.clone(),
            placement,
        });
        self.phase = PreviewPhase::Active {
            region,
            panel,
            chart,
            placement,
        };
    }

    /// Returns to `Idle`: invalidates any scheduled preview, destroys the
    /// chart, unmounts the panel, then sweeps leftover preview panels.
    pub fn teardown<C: ChartSurface, M: MapSurface>(
        &mut self,
        charts: &mut C,
        map: &mut M,
        events: &mut Vec<InteractionEvent>,
    ) {
        self.generation += 1;
        match std::mem::replace(&mut self.phase, PreviewPhase::Idle) {
            PreviewPhase::Idle => {}
            PreviewPhase::Scheduled { region, timer, .. } => {
                self.timers.cancel(timer);
                trace!(region = %region, "scheduled preview cancelled");
                events.push(InteractionEvent::PreviewCancelled { region });
            }
            PreviewPhase::Active {
                region,
                panel,
                chart,
                ..
            } => {
                charts.destroy(chart);
                map.unmount_preview(panel);
                trace!(region = %region, "preview hidden");
                events.push(InteractionEvent::PreviewHidden { region });
            }
        }

        let orphans = map.sweep_preview_panels();
        if orphans > 0 {
            warn!(orphans, "swept orphaned preview panels");
        }
    }
}

fn suppress(events: &mut Vec<InteractionEvent>, region: RegionId, reason: PreviewSuppression) {
    trace!(region = %region, ?reason, "preview suppressed");
    events.push(InteractionEvent::PreviewSuppressed { region, reason });
}
