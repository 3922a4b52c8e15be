//! Change notifications emitted by a drawing session.

use crate::stroke::{LineEffect, StrokeColor, StrokeId};
use crate::tools::Tool;
use kurbo::Size;

/// Something observable changed in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A gesture began an in-progress stroke.
    StrokeStarted { tool: Tool },
    /// An in-progress stroke was committed to history.
    StrokeCommitted { id: StrokeId, points: usize },
    Undone { id: StrokeId },
    Redone { id: StrokeId },
    /// History was wiped.
    Cleared { removed: usize },
    ToolChanged(Tool),
    ColorChanged(StrokeColor),
    StrokeWidthChanged(f64),
    StyleEffectChanged(Option<LineEffect>),
    SurfaceResized(Size),
    /// Emitted after every history mutation with the fresh flags.
    HistoryChanged { can_undo: bool, can_redo: bool },
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&SessionEvent) + Send>;

/// Synchronous broadcast to registered listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("<{} listeners>", self.listeners.len()))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it sees every event emitted afterwards.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SessionEvent) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to all listeners in subscription order.
    pub fn emit(&mut self, event: SessionEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_reaches_listeners() {
        let mut bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        bus.emit(SessionEvent::ToolChanged(Tool::Eraser));
        assert_eq!(*seen.lock().unwrap(), vec![SessionEvent::ToolChanged(Tool::Eraser)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let id = bus.subscribe(move |_| *sink.lock().unwrap() += 1);

        bus.emit(SessionEvent::Cleared { removed: 0 });
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(SessionEvent::Cleared { removed: 0 });

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_listener_ids_are_distinct() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(|_| {});
        let b = bus.subscribe(|_| {});
        assert_ne!(a, b);
        assert_eq!(bus.len(), 2);
    }
}
