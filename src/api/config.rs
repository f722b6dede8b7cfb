use serde::{Deserialize, Serialize};

use crate::core::{PanelSize, PlacementOffsets, Viewport};
use crate::error::{OverlayError, OverlayResult};

use super::validation::validate_overlay_config;

/// Hover preview tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Delay between hover-start and preview construction.
    pub debounce_ms: u64,
    pub panel_width: f64,
    pub title_height: f64,
    pub chart_height: f64,
    pub padding: f64,
    pub pointer_offset: f64,
    pub flip_gap: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            panel_width: 300.0,
            title_height: 20.0,
            chart_height: 150.0,
            padding: 8.0,
            pointer_offset: 15.0,
            flip_gap: 10.0,
        }
    }
}

impl PreviewConfig {
    /// Outer size of the floating panel: title strip, chart and vertical padding.
    #[must_use]
    pub fn panel_size(&self) -> PanelSize {
        PanelSize::new(
            self.panel_width,
            self.title_height + self.chart_height + self.padding * 2.0,
        )
    }

    #[must_use]
    pub fn placement_offsets(&self) -> PlacementOffsets {
        PlacementOffsets {
            pointer_offset: self.pointer_offset,
            flip_gap: self.flip_gap,
        }
    }
}

/// Pinned detail panel tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    pub chart_height: f64,
    pub min_width: f64,
    pub max_width: f64,
    /// Short name of the plotted metric, e.g. `TFR`.
    pub metric_label: String,
    pub value_unit: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            chart_height: 200.0,
            min_width: 300.0,
            max_width: 400.0,
            metric_label: "TFR".to_owned(),
            value_unit: "children per woman".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Percent changes within `±flat_threshold_percent` read as flat.
    pub flat_threshold_percent: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            flat_threshold_percent: 0.1,
        }
    }
}

/// Where region shapes come from and how feature properties are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub primary_location: String,
    pub fallback_location: String,
    /// Property keys probed in order for the region name.
    pub name_keys: Vec<String>,
    pub placeholder_name: String,
    /// Region names dropped at load time, compared case-insensitively.
    pub excluded_names: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            primary_location: "../data/countries.geojson".to_owned(),
            fallback_location: "countries.geojson".to_owned(),
            name_keys: vec!["ADMIN".to_owned(), "name".to_owned()],
            placeholder_name: "Unknown region".to_owned(),
            excluded_names: vec!["antarctica".to_owned()],
        }
    }
}

/// Public overlay bootstrap configuration.
///
/// Serializable so hosts can ship overlay setup next to their map config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub detail: DetailConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl OverlayConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            preview: PreviewConfig::default(),
            detail: DetailConfig::default(),
            trend: TrendConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }

    #[must_use]
    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: DetailConfig) -> Self {
        self.detail = detail;
        self
    }

    #[must_use]
    pub fn with_trend(mut self, trend: TrendConfig) -> Self {
        self.trend = trend;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.preview.debounce_ms = debounce_ms;
        self
    }

    pub fn validate(&self) -> OverlayResult<()> {
        validate_overlay_config(self)
    }

    pub fn from_json_str(input: &str) -> OverlayResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            OverlayError::InvalidData(format!("failed to parse overlay config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> OverlayResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            OverlayError::InvalidData(format!("failed to serialize overlay config: {e}"))
        })
    }
}
