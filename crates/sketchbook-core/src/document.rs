//! The stroke document and its undoable operations.

use crate::geometry::{BoundingBox, SelectionRect};
use crate::history::{History, Snapshot};
use crate::selection;
use crate::stroke::{SerializableColor, Stroke, StrokeId, StrokePoint};
use crate::tools::ToolMode;
use kurbo::Point;
use std::collections::HashSet;

/// Committed strokes, the stroke being drawn, and selection state.
///
/// Selection and focus only ever name strokes present in `strokes`. Every
/// operation that removes a stroke prunes it from both.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Committed strokes in draw order (back to front).
    strokes: Vec<Stroke>,
    /// Stroke under construction, not yet part of `strokes`.
    current_stroke: Option<Stroke>,
    selection: HashSet<StrokeId>,
    focused: Option<StrokeId>,
    history: History,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: History::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Replace all content with `strokes` and forget history.
    pub fn load_strokes(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.current_stroke = None;
        self.selection.clear();
        self.focused = None;
        self.history.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current_stroke.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    pub fn selection(&self) -> &HashSet<StrokeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: StrokeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn focused(&self) -> Option<StrokeId> {
        self.focused
    }

    pub fn get_stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: StrokeId) -> bool {
        self.get_stroke(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Union of all committed stroke bounds.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.strokes
            .iter()
            .map(Stroke::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn snapshot(&self) -> Snapshot {
        self.strokes.clone()
    }

    /// Push current state to the undo stack (call before making changes).
    fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Begin a stroke with `tool`. Returns false for non-drawing tools.
    ///
    /// Calligraphy strokes store an amplified width. A stroke already in
    /// progress is discarded.
    pub fn start_drawing(
        &mut self,
        point: StrokePoint,
        color: SerializableColor,
        width: f64,
        tool: ToolMode,
    ) -> bool {
        let Some(style) = tool.stroke_style() else {
            return false;
        };
        if self.current_stroke.is_some() {
            log::debug!("Discarding unfinished stroke");
        }
        self.current_stroke = Some(Stroke::new(point, color, style.stored_width(width), style));
        true
    }

    /// Append a sample to the stroke in progress, if any.
    pub fn continue_drawing(&mut self, point: StrokePoint) -> bool {
        match self.current_stroke.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Commit the stroke in progress. Returns the committed stroke's id.
    pub fn end_drawing(&mut self) -> Option<StrokeId> {
        let stroke = self.current_stroke.take()?;
        if stroke.is_empty() {
            return None;
        }

        self.push_undo();
        let id = stroke.id();
        log::debug!("Committed stroke {} with {} points", id, stroke.len());
        self.strokes.push(stroke);
        Some(id)
    }

    /// Remove every stroke. Returns false if there was nothing to clear.
    ///
    /// The redo stack is dropped either way; an empty document records no
    /// undo entry.
    pub fn clear(&mut self) -> bool {
        if self.strokes.is_empty() {
            self.history.clear_future();
            return false;
        }

        self.push_undo();
        log::debug!("Cleared {} strokes", self.strokes.len());
        self.strokes.clear();
        self.selection.clear();
        self.focused = None;
        true
    }

    /// Remove a single stroke as its own undoable action.
    pub fn remove_stroke(&mut self, id: StrokeId) -> bool {
        let Some(index) = self.strokes.iter().position(|s| s.id() == id) else {
            return false;
        };

        self.push_undo();
        self.strokes.remove(index);
        self.selection.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        log::debug!("Removed stroke {}", id);
        true
    }

    /// Remove the stroke nearest to `point` within `radius`.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> Option<StrokeId> {
        let id = selection::nearest_stroke(point, &self.strokes, radius)?;
        self.remove_stroke(id);
        Some(id)
    }

    /// Delete selected strokes as one undoable action.
    /// Returns the number of strokes removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }

        self.push_undo();
        let before = self.strokes.len();
        let selection = std::mem::take(&mut self.selection);
        self.strokes.retain(|s| !selection.contains(&s.id()));
        self.focused = None;

        let removed = before - self.strokes.len();
        log::debug!("Deleted {} selected strokes", removed);
        removed
    }

    /// Add `id` to the selection, or remove it if already selected.
    ///
    /// Toggling the focused stroke clears focus.
    pub fn toggle_selection(&mut self, id: StrokeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        true
    }

    /// Toggle the selection of the stroke nearest `point` within `radius`.
    pub fn select_at(&mut self, point: Point, radius: f64) -> Option<StrokeId> {
        let id = selection::nearest_stroke(point, &self.strokes, radius)?;
        self.toggle_selection(id);
        Some(id)
    }

    /// Replace the selection with every stroke whose bounds touch `rect`.
    /// Clears focus. Returns the number of strokes selected.
    pub fn select_in_rect(&mut self, rect: &SelectionRect) -> usize {
        self.selection = selection::strokes_in_rect(rect, &self.strokes)
            .into_iter()
            .collect();
        self.focused = None;
        self.selection.len()
    }

    /// Select all strokes.
    pub fn select_all(&mut self) {
        self.selection = self.strokes.iter().map(Stroke::id).collect();
    }

    /// Clear selection and focus.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.focused = None;
    }

    /// Focus `id`, or unfocus it if it already has focus.
    pub fn toggle_focus(&mut self, id: StrokeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.focused = if self.focused == Some(id) { None } else { Some(id) };
        true
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                log::debug!("Undo, {} strokes", self.strokes.len());
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                log::debug!("Redo, {} strokes", self.strokes.len());
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.strokes = snapshot;
        // Selection and focus are not part of snapshots.
        self.selection.clear();
        self.focused = None;
    }
}
