//! Observer list for drag lifecycle and hot-zone notifications.

use std::fmt;

use crate::drag::{DragPayload, DropOutcome};
use crate::hot_zone::HotZone;

/// Notification emitted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DockEvent {
    /// Pointer went down on a draggable element; below the threshold.
    DragArmed(DragPayload),
    /// Threshold exceeded; the payload is now being dragged.
    DragStarted(DragPayload),
    HotZoneEntered(HotZone),
    HotZoneLeft(HotZone),
    /// Release committed the payload.
    DragCommitted {
        payload: DragPayload,
        outcome: DropOutcome,
    },
    /// The drag was cancelled and the pre-drag layout restored.
    DragCancelled(DragPayload),
    /// The layout tree changed. Follows `DragCommitted` when a drop applied.
    LayoutChanged,
}

pub type Observer = Box<dyn FnMut(&DockEvent) + Send>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Explicit list of observers, notified in subscription order.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&DockEvent) + Send + 'static) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn emit(&mut self, event: DockEvent) {
        tracing::trace!(?event, "dock event");
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Arc::clone(&seen);
        let id = bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        bus.emit(DockEvent::LayoutChanged);
        assert!(bus.unsubscribe(id));
        bus.emit(DockEvent::LayoutChanged);

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(bus.is_empty());
        assert!(!bus.unsubscribe(id));
    }
}
