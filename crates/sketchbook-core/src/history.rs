//! Bounded undo/redo history of stroke snapshots.

use crate::stroke::Stroke;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A snapshot of the committed strokes for undo/redo.
pub type Snapshot = Vec<Stroke>;

/// Undo and redo stacks of whole-document snapshots.
///
/// The capacity bounds the undo stack on every push, whether it comes from
/// [`History::record`] or from [`History::redo`]. The redo stack is bounded
/// only by the number of undos.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_UNDO_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.push_past(snapshot);
        self.future.clear();
    }

    /// Swap `current` for the most recent undo state.
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.past.pop_back()?;
        self.future.push(current);
        Some(snapshot)
    }

    /// Swap `current` for the most recently undone state.
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.future.pop()?;
        self.push_past(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop the redo stack only.
    pub fn clear_future(&mut self) {
        self.future.clear();
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}
