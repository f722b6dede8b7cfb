use std::time::Duration;

use choropleth_rs::api::{InteractionArbiter, OverlayConfig};
use choropleth_rs::catalog::parse_feature_collection;
use choropleth_rs::core::{PanelSize, PlacementOffsets, PointerPosition, RegionId, Viewport, place};
use choropleth_rs::render::{RecordingChartSurface, RecordingMapSurface};
use choropleth_rs::series::SyntheticSeriesProvider;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_place_panel(c: &mut Criterion) {
    let viewport = Viewport::new(1920, 1080);
    let size = PanelSize::new(300.0, 186.0);
    let offsets = PlacementOffsets::default();

    c.bench_function("place_panel", |b| {
        b.iter(|| {
            let _ = place(
                black_box(PointerPosition::new(1_800.0, 1_000.0)),
                black_box(size),
                black_box(viewport),
                black_box(offsets),
            );
        })
    });
}

fn bench_hover_click_storm_1k(c: &mut Criterion) {
    let regions: Vec<RegionId> = (0..50).map(|i| RegionId::new(format!("region-{i}"))).collect();

    c.bench_function("hover_click_storm_1k", |b| {
        b.iter(|| {
            let mut arbiter = InteractionArbiter::new(
                RecordingChartSurface::new(),
                RecordingMapSurface::new(),
                Box::new(SyntheticSeriesProvider::new(42)),
                OverlayConfig::new(Viewport::new(1600, 900)),
            )
            .expect("arbiter init");

            let mut now = Duration::ZERO;
            for step in 0..1_000u32 {
                let region = &regions[step as usize % regions.len()];
                let pointer = PointerPosition::new(f64::from(step % 1_600), f64::from(step % 900));
                arbiter.on_region_hover_start(region, pointer);
                arbiter.on_region_hover_move(region, pointer);
                now += Duration::from_millis(u64::from(step % 80));
                arbiter.advance_time(now);
                if step % 97 == 0 {
                    arbiter.on_region_clicked(region);
                }
                if step % 131 == 0 {
                    arbiter.on_map_background_clicked();
                }
                arbiter.on_region_hover_end(region);
            }
            black_box(arbiter.into_surfaces());
        })
    });
}

fn bench_parse_catalog_500(c: &mut Criterion) {
    let features: Vec<String> = (0..500)
        .map(|i| {
            format!(
                r#"{{"type":"Feature","properties":{{"ADMIN":"Country {i}"}},"geometry":{{"type":"Point","coordinates":[{i}.0,1.0]}}}}"#
            )
        })
        .collect();
    let document = format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    );
    let config = OverlayConfig::new(Viewport::new(1600, 900)).catalog;

    c.bench_function("parse_catalog_500", |b| {
        b.iter(|| {
            let _ = parse_feature_collection(black_box(&document), &config)
                .expect("valid collection");
        })
    });
}

criterion_group!(
    benches,
    bench_place_panel,
    bench_hover_click_storm_1k,
    bench_parse_catalog_500
);
criterion_main!(benches);
