use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{RegionId, Series, SeriesPoint};
use crate::error::{OverlayError, OverlayResult};

use super::SeriesProvider;

const CZECH_NAMES: [&str; 2] = ["Czech Republic", "Česká republika"];

/// Generates plausible declining fertility-rate series for demos.
///
/// Each region draws from its own generator seeded by `seed` and the region
/// name, so two providers with the same seed agree.
#[derive(Debug, Clone)]
pub struct SyntheticSeriesProvider {
    seed: u64,
    start_year: i32,
    end_year: i32,
}

impl SyntheticSeriesProvider {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_year: 2000,
            end_year: 2024,
        }
    }

    pub fn with_years(mut self, start_year: i32, end_year: i32) -> OverlayResult<Self> {
        if start_year > end_year {
            return Err(OverlayError::InvalidData(format!(
                "synthetic series start year {start_year} must be <= end year {end_year}"
            )));
        }
        self.start_year = start_year;
        self.end_year = end_year;
        Ok(self)
    }

    fn rng_for(&self, region: &RegionId) -> StdRng {
        let mut hasher = DefaultHasher::new();
        region.as_str().hash(&mut hasher);
        StdRng::seed_from_u64(self.seed ^ hasher.finish())
    }
}

impl SeriesProvider for SyntheticSeriesProvider {
    fn series_for(&mut self, region: &RegionId) -> OverlayResult<Series> {
        let mut rng = self.rng_for(region);
        let czech = CZECH_NAMES.contains(&region.as_str());
        let base_rate: f64 = rng.gen_range(1.0..3.0);
        let span = f64::from((self.end_year - self.start_year).max(1));

        let points = (self.start_year..=self.end_year).map(|year| {
            let year_factor = f64::from(year - self.start_year) / span;
            let variation: f64 = rng.gen_range(-0.1..0.1);
            let rate = if czech {
                czech_rate(year, variation)
            } else {
                (base_rate * (1.0 - year_factor * 0.7) + variation).max(0.8)
            };
            SeriesPoint::new(year, rate)
        });
        Series::from_points(points.collect::<Vec<_>>())
    }
}

fn czech_rate(year: i32, variation: f64) -> f64 {
    if year < 2010 {
        1.15 + f64::from(year - 2000) * 0.04 + variation * 0.1
    } else {
        1.5 + f64::from(year - 2010) * 0.01 + variation * 0.1
    }
}
