use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::api::DetailConfig;
use crate::core::{RegionId, Series};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Preview,
    Detail,
}

/// Backend-neutral description of a filled line chart over one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub series_label: String,
    pub title: Option<String>,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub y_min: f64,
    pub y_max: f64,
    pub point_radius: f64,
    pub max_ticks: usize,
    pub animate: bool,
    pub line_color: Color,
    pub fill_color: Color,
}

impl ChartSpec {
    /// Compact chart for the hover preview. `None` for an empty series.
    #[must_use]
    pub fn preview(series: &Series, metric_label: &str) -> Option<Self> {
        let mut spec = Self::base(ChartKind::Preview, series, metric_label)?;
        spec.point_radius = if series.len() > 30 { 0.0 } else { 2.0 };
        spec.max_ticks = tick_limit(series.len(), [12, 8, 6]);
        spec.animate = false;
        Some(spec)
    }

    /// Titled chart for the pinned detail panel. `None` for an empty series.
    #[must_use]
    pub fn detail(region: &RegionId, series: &Series, config: &DetailConfig) -> Option<Self> {
        let mut spec = Self::base(ChartKind::Detail, series, &config.metric_label)?;
        spec.point_radius = if series.len() > 30 { 0.0 } else { 3.0 };
        spec.max_ticks = tick_limit(series.len(), [20, 15, 10]);
        spec.title = Some(format!(
            "{} trend: {region} ({})",
            config.metric_label,
            series.year_range_label()
        ));
        spec.x_axis_title = Some("Year".to_owned());
        spec.y_axis_title = Some(format!("{} ({})", config.metric_label, config.value_unit));
        Some(spec)
    }

    /// Hover tooltip text for the sample at `index`.
    #[must_use]
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let value = self.values.get(index)?;
        match self.kind {
            ChartKind::Preview => {
                let label = self.labels.get(index)?;
                Some(format!("Year {label}: {value:.2}"))
            }
            ChartKind::Detail => Some(format!("{}: {value:.2}", self.series_label)),
        }
    }

    fn base(kind: ChartKind, series: &Series, metric_label: &str) -> Option<Self> {
        let min = series.rates().map(OrderedFloat).min()?.into_inner();
        let max = series.rates().map(OrderedFloat).max()?.into_inner();
        Some(Self {
            kind,
            series_label: metric_label.to_owned(),
            title: None,
            x_axis_title: None,
            y_axis_title: None,
            labels: series.years().map(|year| year.to_string()).collect(),
            values: series.rates().collect(),
            y_min: min * 0.95,
            y_max: max * 1.05,
            point_radius: 0.0,
            max_ticks: 0,
            animate: true,
            line_color: Color::rgba(75.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0, 1.0),
            fill_color: Color::rgba(75.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0, 0.3),
        })
    }
}

/// Picks the x tick limit for `<= 20`, `<= 40` and `> 40` samples.
fn tick_limit(len: usize, limits: [usize; 3]) -> usize {
    if len > 40 {
        limits[2]
    } else if len > 20 {
        limits[1]
    } else {
        limits[0]
    }
}
