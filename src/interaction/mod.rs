//! Preview and detail controllers plus the timer queue driving debounce.

mod detail;
mod preview;
mod timer;

pub use detail::{ChartSlots, DetailController};
pub use preview::{PreviewController, PreviewGate, PreviewStatus};
pub use timer::{TimerId, TimerQueue};
