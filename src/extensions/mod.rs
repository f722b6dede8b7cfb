mod observers;

pub use observers::{InteractionEvent, InteractionObserver, PreviewSuppression};
