use approx::assert_relative_eq;
use choropleth_rs::api::{DetailConfig, TrendConfig};
use choropleth_rs::core::{RegionId, Series, Trend, TrendDirection};
use choropleth_rs::render::DetailPanel;

fn series(pairs: &[(i32, f64)]) -> Series {
    Series::from_pairs(pairs.iter().copied()).expect("valid series")
}

#[test]
fn halving_reads_as_fifty_percent_down() {
    let trend = Trend::from_series(&series(&[(2000, 2.0), (2010, 1.7), (2020, 1.0)]), 0.1);

    assert_eq!(trend.percent(), Some(-50.0));
    assert_eq!(trend.direction(), Some(TrendDirection::Down));
    assert_eq!(trend.to_string(), "\u{2198} -50.0% (2000-2020)");
}

#[test]
fn increase_reads_as_up() {
    let trend = Trend::from_series(&series(&[(2000, 1.4), (2020, 1.5)]), 0.1);

    assert_relative_eq!(trend.percent().expect("change"), 7.142_857, epsilon = 1e-5);
    assert_eq!(trend.direction(), Some(TrendDirection::Up));
    assert_eq!(trend.to_string(), "\u{2197} 7.1% (2000-2020)");
}

#[test]
fn tiny_changes_within_threshold_are_flat() {
    let trend = Trend::from_series(&series(&[(2000, 2.0), (2020, 2.001)]), 0.1);
    assert_eq!(trend.direction(), Some(TrendDirection::Flat));
    assert!(trend.to_string().starts_with('\u{2192}'));
}

#[test]
fn single_sample_is_single_year() {
    let trend = Trend::from_series(&series(&[(2010, 1.6)]), 0.1);
    assert_eq!(trend, Trend::SingleYear);
    assert_eq!(trend.to_string(), "\u{2192} single year");
}

#[test]
fn zero_first_value_is_unavailable() {
    let trend = Trend::from_series(&series(&[(2000, 0.0), (2020, 1.5)]), 0.1);
    assert_eq!(trend, Trend::Unavailable);
    assert_eq!(trend.to_string(), "unavailable");
    assert_eq!(trend.percent(), None);
}

#[test]
fn empty_series_is_unavailable() {
    assert_eq!(Trend::from_series(&Series::empty(), 0.1), Trend::Unavailable);
}

#[test]
fn detail_panel_summarizes_latest_value_and_trend() {
    let region = RegionId::from("Norway");
    let panel = DetailPanel::build(
        &region,
        &series(&[(2000, 2.0), (2024, 1.4)]),
        &DetailConfig::default(),
        TrendConfig::default(),
    );

    assert_eq!(panel.latest_line, "TFR 2024: 1.40 children per woman");
    assert_eq!(panel.trend_line, "Trend: \u{2198} -30.0% (2000-2024)");
    assert_eq!(panel.fallback_text, None);
}

#[test]
fn detail_panel_without_data_shows_fallback() {
    let region = RegionId::from("Atlantis");
    let panel = DetailPanel::build(
        &region,
        &Series::empty(),
        &DetailConfig::default(),
        TrendConfig::default(),
    );

    assert_eq!(panel.latest_line, "TFR: N/A");
    assert_eq!(panel.trend_line, "Trend: unavailable");
    assert_eq!(
        panel.fallback_text.as_deref(),
        Some("No data available for Atlantis.")
    );
}
