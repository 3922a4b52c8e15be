//! Pointer events fed by the host surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Host-assigned identity of a contact (mouse, pen or finger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u64);

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { id: PointerId, position: Point },
    Move { id: PointerId, position: Point },
    Up { id: PointerId, position: Point },
    /// The host took the contact away (e.g. claimed by a scroll gesture).
    Cancel { id: PointerId },
}

impl PointerEvent {
    /// Pointer this event belongs to.
    pub fn id(&self) -> PointerId {
        match self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id, .. }
            | PointerEvent::Cancel { id } => *id,
        }
    }

    /// Position, if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(*position),
            PointerEvent::Cancel { .. } => None,
        }
    }
}

/// Tracks which contacts are currently down.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    contacts: HashSet<PointerId>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact going down. Returns true if no other contact was down.
    pub fn press(&mut self, id: PointerId) -> bool {
        let was_idle = self.contacts.iter().all(|c| *c == id);
        self.contacts.insert(id);
        was_idle
    }

    /// Record a contact lifting. Returns true if it was tracked.
    pub fn release(&mut self, id: PointerId) -> bool {
        self.contacts.remove(&id)
    }

    /// Check if a contact is down.
    pub fn is_pressed(&self, id: PointerId) -> bool {
        self.contacts.contains(&id)
    }

    /// Number of contacts currently down.
    pub fn active_count(&self) -> usize {
        self.contacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_contact() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(PointerId(1)));
        assert!(tracker.is_pressed(PointerId(1)));
        assert!(tracker.release(PointerId(1)));
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn test_second_contact_is_not_idle() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(PointerId(1)));
        assert!(!tracker.press(PointerId(2)));
        assert_eq!(tracker.active_count(), 2);

        tracker.release(PointerId(1));
        // Second finger is still down.
        assert!(!tracker.press(PointerId(3)));
    }

    #[test]
    fn test_release_unknown() {
        let mut tracker = PointerTracker::new();
        assert!(!tracker.release(PointerId(9)));
    }

    #[test]
    fn test_event_accessors() {
        let down = PointerEvent::Down {
            id: PointerId(4),
            position: Point::new(1.0, 2.0),
        };
        assert_eq!(down.id(), PointerId(4));
        assert_eq!(down.position(), Some(Point::new(1.0, 2.0)));

        let cancel = PointerEvent::Cancel { id: PointerId(4) };
        assert_eq!(cancel.position(), None);
    }
}
