use crate::error::{OverlayError, OverlayResult};

use super::{CatalogConfig, DetailConfig, OverlayConfig, PreviewConfig, TrendConfig};

pub(super) fn validate_overlay_config(config: &OverlayConfig) -> OverlayResult<()> {
    if !config.viewport.is_valid() {
        return Err(OverlayError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }
    validate_preview_config(&config.preview)?;
    validate_detail_config(&config.detail)?;
    validate_trend_config(config.trend)?;
    validate_catalog_config(&config.catalog)
}

fn validate_preview_config(config: &PreviewConfig) -> OverlayResult<()> {
    for (name, value) in [
        ("panel_width", config.panel_width),
        ("title_height", config.title_height),
        ("chart_height", config.chart_height),
    ] {
        ensure_positive_finite("preview", name, value)?;
    }
    for (name, value) in [
        ("padding", config.padding),
        ("pointer_offset", config.pointer_offset),
        ("flip_gap", config.flip_gap),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(OverlayError::InvalidData(format!(
                "preview `{name}` must be finite and >= 0"
            )));
        }
    }
    Ok(())
}

fn validate_detail_config(config: &DetailConfig) -> OverlayResult<()> {
    ensure_positive_finite("detail", "chart_height", config.chart_height)?;
    ensure_positive_finite("detail", "min_width", config.min_width)?;
    ensure_positive_finite("detail", "max_width", config.max_width)?;
    if config.min_width > config.max_width {
        return Err(OverlayError::InvalidData(
            "detail min_width must be <= max_width".to_owned(),
        ));
    }
    if config.metric_label.trim().is_empty() {
        return Err(OverlayError::InvalidData(
            "detail metric_label must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_trend_config(config: TrendConfig) -> OverlayResult<()> {
    if !config.flat_threshold_percent.is_finite() || config.flat_threshold_percent < 0.0 {
        return Err(OverlayError::InvalidData(
            "trend flat_threshold_percent must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_catalog_config(config: &CatalogConfig) -> OverlayResult<()> {
    if config.name_keys.is_empty() || config.name_keys.iter().any(|key| key.is_empty()) {
        return Err(OverlayError::InvalidData(
            "catalog name_keys must be a non-empty list of non-empty keys".to_owned(),
        ));
    }
    if config.placeholder_name.trim().is_empty() {
        return Err(OverlayError::InvalidData(
            "catalog placeholder_name must not be empty".to_owned(),
        ));
    }
    if config.primary_location.is_empty() {
        return Err(OverlayError::InvalidData(
            "catalog primary_location must not be empty".to_owned(),
        ));
    }
    Ok(())
}

fn ensure_positive_finite(section: &str, name: &str, value: f64) -> OverlayResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OverlayError::InvalidData(format!(
            "{section} `{name}` must be finite and > 0"
        )));
    }
    Ok(())
}
