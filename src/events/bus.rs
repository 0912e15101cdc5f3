//! Per-store event bus with synchronous fan-out.

use std::cell::RefCell;
use std::collections::HashMap;

use super::types::{EventKind, StoreEvent};

/// A registered event listener.
pub type Listener<T> = Box<dyn FnMut(&StoreEvent<T>)>;

/// Maps event kinds to ordered listener lists.
///
/// Listeners run synchronously, in registration order, on the thread that
/// triggered the operation. A listener that panics propagates to the
/// caller of the triggering operation. Listeners are borrowed mutably for
/// the duration of a fan-out, so registering or emitting from inside a
/// listener panics.
pub struct EventBus<T> {
    listeners: RefCell<HashMap<EventKind, Vec<Listener<T>>>>,
}

impl<T> EventBus<T> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Register a listener for an event kind. No de-registration.
    pub fn on(&self, kind: EventKind, listener: Listener<T>) {
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(listener);
    }

    /// Number of listeners registered for a kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .get(&kind)
            .map_or(0, |list| list.len())
    }

    /// Fan an event out to its kind's listeners, in registration order.
    pub fn emit(&self, event: &StoreEvent<T>) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(list) = listeners.get_mut(&event.kind()) {
            for listener in list.iter_mut() {
                listener(event);
            }
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
