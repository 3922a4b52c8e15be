//! Linear undo/redo history over committed strokes.

use crate::stroke::Stroke;

/// Committed strokes plus the strokes available for redo.
///
/// Strokes move between the two stacks by their tail and are never duplicated.
/// Committing a new stroke always discards the redo stack.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Visible drawing, oldest first.
    committed: Vec<Stroke>,
    /// Undone strokes; the last element is redone first.
    redo_stack: Vec<Stroke>,
}

impl StrokeHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished stroke and invalidate redo.
    pub fn commit(&mut self, stroke: Stroke) {
        self.committed.push(stroke);
        self.redo_stack.clear();
    }

    /// Move the newest committed stroke to the redo stack.
    /// Returns the moved stroke, or `None` if there was nothing to undo.
    pub fn undo(&mut self) -> Option<&Stroke> {
        let stroke = self.committed.pop()?;
        self.redo_stack.push(stroke);
        self.redo_stack.last()
    }

    /// Move the most recently undone stroke back onto the drawing.
    /// Returns the moved stroke, or `None` if there was nothing to redo.
    pub fn redo(&mut self) -> Option<&Stroke> {
        let stroke = self.redo_stack.pop()?;
        self.committed.push(stroke);
        self.committed.last()
    }

    /// Drop everything, including the redo stack. Returns how many strokes were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.committed.len() + self.redo_stack.len();
        self.committed.clear();
        self.redo_stack.clear();
        removed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Committed strokes in paint order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    /// Undone strokes; the last one is redone next.
    pub fn redo_strokes(&self) -> &[Stroke] {
        &self.redo_stack
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
