mod arbiter;
mod config;
mod observer_registry;
mod pointer_events;
mod session_snapshot;
mod validation;

pub use arbiter::InteractionArbiter;
pub use config::{CatalogConfig, DetailConfig, OverlayConfig, PreviewConfig, TrendConfig};
pub use session_snapshot::{SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshot};
