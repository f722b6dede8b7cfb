use std::time::Duration;

use choropleth_rs::api::{InteractionArbiter, OverlayConfig};
use choropleth_rs::core::{PointerPosition, RegionId, Series, Viewport};
use choropleth_rs::render::{MapSurface, RecordingChartSurface, RecordingMapSurface};
use choropleth_rs::series::StaticSeriesProvider;
use proptest::prelude::*;

const REGIONS: [&str; 4] = ["A", "B", "C", "Z"];

#[derive(Debug, Clone)]
enum Op {
    HoverStart(usize, f64, f64),
    HoverMove(usize, f64, f64),
    HoverEnd(usize),
    Click(usize),
    Background,
    Opened(usize),
    Dismissed(usize),
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 0.0f64..1280.0, 0.0f64..800.0).prop_map(|(r, x, y)| Op::HoverStart(r, x, y)),
        (0usize..4, 0.0f64..1280.0, 0.0f64..800.0).prop_map(|(r, x, y)| Op::HoverMove(r, x, y)),
        (0usize..4).prop_map(Op::HoverEnd),
        (0usize..4).prop_map(Op::Click),
        Just(Op::Background),
        (0usize..4).prop_map(Op::Opened),
        (0usize..4).prop_map(Op::Dismissed),
        (0u64..120).prop_map(Op::Advance),
    ]
}

fn build_arbiter() -> InteractionArbiter<RecordingChartSurface, RecordingMapSurface> {
    let series = |pairs: [(i32, f64); 2]| Series::from_pairs(pairs).expect("valid series");
    let provider = StaticSeriesProvider::new()
        .with_series("A", series([(2000, 2.0), (2020, 1.0)]))
        .with_series("B", series([(2000, 1.4), (2020, 1.5)]))
        .with_series("C", series([(2000, 3.1), (2024, 2.2)]));
    InteractionArbiter::new(
        RecordingChartSurface::new(),
        RecordingMapSurface::new(),
        Box::new(provider),
        OverlayConfig::new(Viewport::new(1280, 800)),
    )
    .expect("arbiter init")
}

proptest! {
    #[test]
    fn interaction_invariants_hold_for_any_event_sequence(
        ops in prop::collection::vec(op_strategy(), 1..80)
    ) {
        let mut arbiter = build_arbiter();
        let mut now = Duration::ZERO;

        for op in ops {
            match op {
                Op::HoverStart(r, x, y) => {
                    arbiter.on_region_hover_start(&RegionId::from(REGIONS[r]), PointerPosition::new(x, y));
                }
                Op::HoverMove(r, x, y) => {
                    arbiter.on_region_hover_move(&RegionId::from(REGIONS[r]), PointerPosition::new(x, y));
                }
                Op::HoverEnd(r) => arbiter.on_region_hover_end(&RegionId::from(REGIONS[r])),
                Op::Click(r) => arbiter.on_region_clicked(&RegionId::from(REGIONS[r])),
                Op::Background => arbiter.on_map_background_clicked(),
                Op::Opened(r) => arbiter.on_detail_panel_opened(&RegionId::from(REGIONS[r])),
                Op::Dismissed(r) => {
                    let region = RegionId::from(REGIONS[r]);
                    if arbiter.pinned_region() == Some(&region) {
                        arbiter.map_surface_mut().close_detail(&region);
                    }
                    arbiter.on_detail_panel_dismissed(&region);
                }
                Op::Advance(step) => {
                    now += Duration::from_millis(step);
                    arbiter.advance_time(now);
                }
            }

            prop_assert!(arbiter.pinned_region().is_none() || arbiter.preview_region().is_none());
            prop_assert!(arbiter.chart_surface().violations().is_empty());
            prop_assert!(arbiter.map_surface().max_previews() <= 1);
            prop_assert!(arbiter.map_surface().max_details() <= 1);

            let preview_charts = usize::from(arbiter.preview_status().is_active());
            let detail_charts = arbiter
                .pinned_region()
                .map_or(0, |region| usize::from(region.as_str() != "Z"));
            prop_assert_eq!(arbiter.chart_surface().live_count(), preview_charts + detail_charts);
            prop_assert_eq!(arbiter.map_surface().preview_count(), preview_charts);
        }

        let (charts, map) = arbiter.into_surfaces();
        prop_assert_eq!(charts.live_count(), 0);
        prop_assert_eq!(map.preview_count(), 0);
        prop_assert_eq!(map.detail_count(), 0);
        prop_assert!(charts.violations().is_empty());
    }
}
