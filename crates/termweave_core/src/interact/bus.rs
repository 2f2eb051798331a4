//! Single-threaded event bus for interaction events.
//!
//! Listeners are plain closures invoked synchronously during the
//! collision system's tick, on the same thread, in subscription order.
//! There is no queue and no cross-thread delivery.

use termweave_shared::events::{EventKind, InteractionEvent};

type Listener = Box<dyn FnMut(&InteractionEvent)>;

/// Dispatches interaction events to subscribed listeners.
#[derive(Default)]
pub struct EventBus {
    /// Listener table, one list per event kind.
    listeners: [Vec<Listener>; EventKind::COUNT],
}

impl EventBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener to one event kind.
    ///
    /// Listeners must not re-enter the collision system; they run while
    /// its pair bookkeeping is mid-update.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.listeners[kind.slot()].push(Box::new(listener));
    }

    /// Number of listeners subscribed to a kind.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners[kind.slot()].len()
    }

    /// Delivers an event to every listener of its kind, in subscription
    /// order.
    pub fn emit(&mut self, event: &InteractionEvent) {
        for listener in &mut self.listeners[event.kind.slot()] {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_reaches_only_matching_kind() {
        let mut bus = EventBus::new();
        let starts = Rc::new(RefCell::new(0u32));
        let ends = Rc::new(RefCell::new(0u32));

        let sink = Rc::clone(&starts);
        bus.subscribe(EventKind::CollisionStart, move |_| {
            *sink.borrow_mut() += 1;
        });
        let sink = Rc::clone(&ends);
        bus.subscribe(EventKind::CollisionEnd, move |_| {
            *sink.borrow_mut() += 1;
        });

        bus.emit(&InteractionEvent::new(EventKind::CollisionStart, 1, 2));
        bus.emit(&InteractionEvent::new(EventKind::CollisionStart, 3, 4));

        assert_eq!(*starts.borrow(), 2);
        assert_eq!(*ends.borrow(), 0);
    }

    #[test]
    fn test_multiple_listeners_run_in_subscription_order() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let sink = Rc::clone(&log);
            bus.subscribe(EventKind::TriggerEnter, move |_| {
                sink.borrow_mut().push(tag);
            });
        }

        bus.emit(&InteractionEvent::new(EventKind::TriggerEnter, 0, 1));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
