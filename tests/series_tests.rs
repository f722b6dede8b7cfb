use std::cell::Cell;
use std::rc::Rc;

use choropleth_rs::core::{RegionId, Series, SeriesPoint};
use choropleth_rs::error::{OverlayError, OverlayResult};
use choropleth_rs::series::{
    FALLBACK_YEAR, SeriesCache, SeriesProvider, StaticSeriesProvider, SyntheticSeriesProvider,
};

struct CountingProvider {
    calls: Rc<Cell<usize>>,
}

impl SeriesProvider for CountingProvider {
    fn series_for(&mut self, _region: &RegionId) -> OverlayResult<Series> {
        self.calls.set(self.calls.get() + 1);
        Series::from_pairs([(2000, 1.8), (2020, 1.6)])
    }
}

struct FailingProvider;

impl SeriesProvider for FailingProvider {
    fn series_for(&mut self, region: &RegionId) -> OverlayResult<Series> {
        Err(OverlayError::SeriesUnavailable {
            region: region.to_string(),
            reason: "upstream offline".to_owned(),
        })
    }
}

#[test]
fn samples_are_sorted_and_last_duplicate_wins() {
    let series =
        Series::from_pairs([(2020, 1.5), (2000, 2.0), (2010, 1.7), (2020, 1.4)]).expect("valid");

    assert_eq!(series.years().collect::<Vec<_>>(), vec![2000, 2010, 2020]);
    assert_eq!(series.latest_rate(), Some(1.4));
    assert_eq!(series.first(), Some(SeriesPoint::new(2000, 2.0)));
    assert_eq!(series.year_range_label(), "2000-2020");
}

#[test]
fn non_finite_rates_are_rejected() {
    let err = Series::from_pairs([(2000, f64::NAN)]).expect_err("nan must fail");
    assert!(matches!(err, OverlayError::InvalidData(_)));
}

#[test]
fn empty_series_has_no_summary() {
    let series = Series::empty();
    assert!(series.is_empty());
    assert_eq!(series.latest_rate(), None);
    assert_eq!(series.year_range_label(), "N/A");
}

#[test]
fn cache_computes_each_region_once() {
    let calls = Rc::new(Cell::new(0));
    let mut cache = SeriesCache::new(Box::new(CountingProvider {
        calls: calls.clone(),
    }));
    let norway = RegionId::from("Norway");
    let chile = RegionId::from("Chile");

    assert!(cache.get(&norway).is_none());
    cache.series_for(&norway);
    cache.series_for(&norway);
    cache.series_for(&chile);
    assert_eq!(calls.get(), 2);
    assert_eq!(cache.len(), 2);

    cache.reset();
    assert!(cache.is_empty());
    cache.series_for(&norway);
    assert_eq!(calls.get(), 3);
}

#[test]
fn provider_failure_substitutes_fallback_record() {
    let mut cache = SeriesCache::new(Box::new(FailingProvider));
    let series = cache.series_for(&RegionId::from("Peru"));

    assert_eq!(series.points(), &[SeriesPoint::new(FALLBACK_YEAR, 0.0)]);
}

#[test]
fn static_provider_returns_empty_for_unknown_regions() {
    let mut provider = StaticSeriesProvider::new().with_series(
        "Chile",
        Series::from_pairs([(2000, 2.1)]).expect("valid"),
    );

    assert_eq!(
        provider
            .series_for(&RegionId::from("Chile"))
            .expect("known")
            .len(),
        1
    );
    assert!(
        provider
            .series_for(&RegionId::from("Mars"))
            .expect("unknown")
            .is_empty()
    );
}

#[test]
fn synthetic_series_is_deterministic_per_seed_and_region() {
    let region = RegionId::from("Kenya");
    let first = SyntheticSeriesProvider::new(7)
        .series_for(&region)
        .expect("synthetic");
    let second = SyntheticSeriesProvider::new(7)
        .series_for(&region)
        .expect("synthetic");

    assert_eq!(first, second);
    assert_eq!(first.len(), 25);
    assert_eq!(first.first_year(), Some(2000));
    assert_eq!(first.last_year(), Some(2024));
    assert!(first.rates().all(|rate| rate >= 0.8 && rate < 3.2));
}

#[test]
fn synthetic_czech_profile_dips_then_recovers() {
    let mut provider = SyntheticSeriesProvider::new(11);
    for name in ["Czech Republic", "Česká republika"] {
        let series = provider
            .series_for(&RegionId::from(name))
            .expect("synthetic");
        let first = series.first().expect("2000").rate;
        let last = series.last().expect("2024").rate;

        assert!((1.13..=1.17).contains(&first), "{name}: {first}");
        assert!((1.62..=1.66).contains(&last), "{name}: {last}");
    }
}

#[test]
fn synthetic_year_range_is_validated() {
    assert!(SyntheticSeriesProvider::new(1).with_years(2020, 2000).is_err());

    let series = SyntheticSeriesProvider::new(1)
        .with_years(2015, 2019)
        .expect("valid range")
        .series_for(&RegionId::from("Fiji"))
        .expect("synthetic");
    assert_eq!(series.len(), 5);
}
