pub mod positioner;
pub mod region;
pub mod series;
pub mod trend;
pub mod types;

pub use positioner::{PlacementOffsets, place};
pub use region::{Region, RegionGeometry, RegionId};
pub use series::{Series, SeriesPoint};
pub use trend::{Trend, TrendDirection};
pub use types::{PanelSize, Placement, PointerPosition, Viewport};
