use serde::{Deserialize, Serialize};

use crate::api::{DetailConfig, TrendConfig};
use crate::core::{PanelSize, Placement, RegionId, Series, Trend};

/// Floating hover panel: a title strip above a chart area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPanel {
    pub region: RegionId,
    pub title: String,
    pub placement: Placement,
    pub size: PanelSize,
    pub padding: f64,
    pub title_height: f64,
    pub chart_height: f64,
}

impl PreviewPanel {
    #[must_use]
    pub fn title_for(region: &RegionId, series: &Series, metric_label: &str) -> String {
        format!("{region}: {metric_label} {}", series.year_range_label())
    }
}

/// Pinned panel content: summary lines, and a chart unless data is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPanel {
    pub region: RegionId,
    pub headline: String,
    pub latest_line: String,
    pub trend: Trend,
    pub trend_line: String,
    /// Shown instead of the chart when the series is empty.
    pub fallback_text: Option<String>,
    pub min_width: f64,
    pub max_width: f64,
    pub chart_height: f64,
}

impl DetailPanel {
    #[must_use]
    pub fn build(
        region: &RegionId,
        series: &Series,
        detail: &DetailConfig,
        trend: TrendConfig,
    ) -> Self {
        let latest_line = match series.last() {
            Some(latest) => format!(
                "{} {}: {:.2} {}",
                detail.metric_label, latest.year, latest.rate, detail.value_unit
            ),
            None => format!("{}: N/A", detail.metric_label),
        };
        let trend = Trend::from_series(series, trend.flat_threshold_percent);
        let fallback_text = series
            .is_empty()
            .then(|| format!("No data available for {region}."));

        Self {
            region: region.clone(),
            headline: region.to_string(),
            latest_line,
            trend,
            trend_line: format!("Trend: {trend}"),
            fallback_text,
            min_width: detail.min_width,
            max_width: detail.max_width,
            chart_height: detail.chart_height,
        }
    }
}
