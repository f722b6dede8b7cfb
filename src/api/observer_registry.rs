use tracing::trace;

use crate::error::{OverlayError, OverlayResult};
use crate::extensions::InteractionObserver;
use crate::render::{ChartSurface, MapSurface};

use super::InteractionArbiter;

impl<C: ChartSurface, M: MapSurface> InteractionArbiter<C, M> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn InteractionObserver>) -> OverlayResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(OverlayError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(OverlayError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    pub(super) fn flush_events(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.events);
        trace!(count = events.len(), observers = self.observers.len(), "dispatch interaction events");
        for event in &events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }
}
