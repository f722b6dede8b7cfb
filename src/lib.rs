//! choropleth-rs: headless interaction core for choropleth map overlays.
//!
//! Each map region offers two mutually exclusive views: a transient hover
//! preview that follows the pointer and a pinned detail panel opened by a
//! click. Both carry a time-series chart. Map drawing and chart drawing stay
//! in the host; this crate arbitrates between the two views, owns every chart
//! handle it asks the host to create, and debounces preview construction.

pub mod api;
pub mod catalog;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod series;
pub mod telemetry;

pub use api::{InteractionArbiter, OverlayConfig};
pub use error::{OverlayError, OverlayResult};
