use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub rate: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(year: i32, rate: f64) -> Self {
        Self { year, rate }
    }
}

/// Year/rate samples sorted ascending by year, one sample per year.
///
/// Summary values are derived on demand from the samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a series from unordered samples.
    ///
    /// Samples are sorted by year; for a repeated year the last sample wins.
    pub fn from_points(points: impl IntoIterator<Item = SeriesPoint>) -> OverlayResult<Self> {
        let mut by_year = BTreeMap::new();
        for point in points {
            if !point.rate.is_finite() {
                return Err(OverlayError::InvalidData(format!(
                    "series rate for year {} must be finite",
                    point.year
                )));
            }
            by_year.insert(point.year, point.rate);
        }
        Ok(Self {
            points: by_year
                .into_iter()
                .map(|(year, rate)| SeriesPoint::new(year, rate))
                .collect(),
        })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> OverlayResult<Self> {
        Self::from_points(
            pairs
                .into_iter()
                .map(|(year, rate)| SeriesPoint::new(year, rate)),
        )
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<SeriesPoint> {
        self.points.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<SeriesPoint> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn first_year(&self) -> Option<i32> {
        self.first().map(|point| point.year)
    }

    #[must_use]
    pub fn last_year(&self) -> Option<i32> {
        self.last().map(|point| point.year)
    }

    /// Rate of the most recent year.
    #[must_use]
    pub fn latest_rate(&self) -> Option<f64> {
        self.last().map(|point| point.rate)
    }

    /// `"first-last"` year span, or `"N/A"` for an empty series.
    #[must_use]
    pub fn year_range_label(&self) -> String {
        match (self.first_year(), self.last_year()) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "N/A".to_owned(),
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|point| point.year)
    }

    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.rate)
    }
}
