use std::fmt;

use serde::{Deserialize, Serialize};

use super::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    /// Classifies a percent change; `|percent| <= flat_threshold` is flat.
    #[must_use]
    pub fn classify(percent: f64, flat_threshold: f64) -> Self {
        if percent > flat_threshold {
            Self::Up
        } else if percent < -flat_threshold {
            Self::Down
        } else {
            Self::Flat
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "\u{2197}",
            Self::Down => "\u{2198}",
            Self::Flat => "\u{2192}",
        }
    }
}

/// First-to-last change of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Trend {
    Change {
        percent: f64,
        direction: TrendDirection,
        first_year: i32,
        last_year: i32,
    },
    /// Only one sample, nothing to compare against.
    SingleYear,
    /// No samples, or a zero first value that would divide by zero.
    Unavailable,
}

impl Trend {
    #[must_use]
    pub fn from_series(series: &Series, flat_threshold_percent: f64) -> Self {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Self::Unavailable;
        };
        if series.len() < 2 {
            return Self::SingleYear;
        }
        if first.rate == 0.0 {
            return Self::Unavailable;
        }

        let percent = (last.rate - first.rate) / first.rate * 100.0;
        Self::Change {
            percent,
            direction: TrendDirection::classify(percent, flat_threshold_percent),
            first_year: first.year,
            last_year: last.year,
        }
    }

    #[must_use]
    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Change { percent, .. } => Some(percent),
            Self::SingleYear | Self::Unavailable => None,
        }
    }

    #[must_use]
    pub fn direction(self) -> Option<TrendDirection> {
        match self {
            Self::Change { direction, .. } => Some(direction),
            Self::SingleYear => Some(TrendDirection::Flat),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Change {
                percent,
                direction,
                first_year,
                last_year,
            } => write!(
                f,
                "{} {percent:.1}% ({first_year}-{last_year})",
                direction.arrow()
            ),
            Self::SingleYear => write!(f, "{} single year", TrendDirection::Flat.arrow()),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}
