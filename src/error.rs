use thiserror::Error;

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to load region catalog from `{location}`: {reason}")]
    CatalogLoad { location: String, reason: String },

    #[error("failed to parse region catalog: {0}")]
    CatalogParse(String),

    #[error("series unavailable for region `{region}`: {reason}")]
    SeriesUnavailable { region: String, reason: String },

    #[error("chart surface failure: {0}")]
    ChartSurface(String),

    #[error("map surface failure: {0}")]
    MapSurface(String),
}
