//! Per-region time series supply and memoization.

mod synthetic;

pub use synthetic::SyntheticSeriesProvider;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{RegionId, Series};
use crate::error::OverlayResult;

/// Year used by the substitute record when a provider fails for one region.
pub const FALLBACK_YEAR: i32 = 2024;

/// Supplies the time series of one region.
///
/// Implementations may randomize, but the cache calls each region only once
/// per session, so hosts see one stable series per region.
pub trait SeriesProvider {
    fn series_for(&mut self, region: &RegionId) -> OverlayResult<Series>;
}

/// In-memory provider. Unknown regions yield an empty series.
#[derive(Debug, Clone, Default)]
pub struct StaticSeriesProvider {
    series: IndexMap<RegionId, Series>,
}

impl StaticSeriesProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, region: impl Into<RegionId>, series: Series) -> Self {
        self.insert(region, series);
        self
    }

    pub fn insert(&mut self, region: impl Into<RegionId>, series: Series) {
        self.series.insert(region.into(), series);
    }
}

impl SeriesProvider for StaticSeriesProvider {
    fn series_for(&mut self, region: &RegionId) -> OverlayResult<Series> {
        Ok(self.series.get(region).cloned().unwrap_or_default())
    }
}

/// Lazily computed series, retained per region until [`SeriesCache::reset`].
pub struct SeriesCache {
    provider: Box<dyn SeriesProvider>,
    entries: IndexMap<RegionId, Series>,
}

impl SeriesCache {
    #[must_use]
    pub fn new(provider: Box<dyn SeriesProvider>) -> Self {
        Self {
            provider,
            entries: IndexMap::new(),
        }
    }

    /// Returns the cached series for `region`, computing it on first use.
    ///
    /// A provider failure is contained to this region: it is logged and
    /// replaced by a single `(FALLBACK_YEAR, 0.0)` record.
    pub fn series_for(&mut self, region: &RegionId) -> &Series {
        if !self.entries.contains_key(region) {
            let series = match self.provider.series_for(region) {
                Ok(series) => {
                    trace!(region = %region, points = series.len(), "computed region series");
                    series
                }
                Err(err) => {
                    warn!(
                        region = %region,
                        error = %err,
                        "series provider failed, substituting fallback record"
                    );
                    fallback_series()
                }
            };
            self.entries.insert(region.clone(), series);
        }
        &self.entries[region]
    }

    #[must_use]
    pub fn get(&self, region: &RegionId) -> Option<&Series> {
        self.entries.get(region)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached series; the next access asks the provider again.
    pub fn reset(&mut self) {
        debug!(cleared = self.entries.len(), "reset series cache");
        self.entries.clear();
    }
}

fn fallback_series() -> Series {
    Series::from_pairs([(FALLBACK_YEAR, 0.0)]).unwrap_or_default()
}
