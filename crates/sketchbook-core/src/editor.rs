//! Pointer-driven editor controller.
//!
//! The editor owns the document and the active tool settings, and is fed
//! one pointer event at a time. Each event is applied completely before the
//! next one arrives.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::drawing::Drawing;
use crate::geometry::SelectionRect;
use crate::input::{PointerEvent, PointerPhase};
use crate::selection;
use crate::stroke::{SerializableColor, StrokeId};
use crate::svg;
use crate::tools::ToolMode;
use kurbo::Point;

/// Default width for new strokes.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// What a pointer event did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing changed.
    Ignored,
    /// The stroke in progress was started or extended.
    Drawing,
    /// A stroke was committed.
    Committed(StrokeId),
    /// A stroke was erased.
    Erased(StrokeId),
    /// A tap toggled the selection of a stroke.
    Toggled(StrokeId),
    /// A drag replaced the selection with this many strokes.
    RectSelected(usize),
}

/// Owns a document and routes pointer gestures to it per active tool.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    tool: ToolMode,
    color: SerializableColor,
    stroke_width: f64,
    config: EditorConfig,
    /// Where the active gesture started.
    gesture_start: Option<Point>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            document: Document::with_history_capacity(config.history_capacity),
            tool: ToolMode::default(),
            color: SerializableColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            config,
            gesture_start: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Set the current tool, committing any stroke in progress.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.document.is_drawing() {
            self.document.end_drawing();
        }
        self.gesture_start = None;
        self.tool = tool;
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Set the width for new strokes. Non-positive widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if width > 0.0 {
            self.stroke_width = width;
        }
    }

    /// Start point of the gesture in progress, if any.
    pub fn gesture_start(&self) -> Option<Point> {
        self.gesture_start
    }

    /// Apply a single pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match event.phase {
            PointerPhase::Start => self.pointer_start(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::End | PointerPhase::Cancel => self.pointer_end(event),
        }
    }

    /// Pointer down. The eraser erases here as well as on every move.
    fn pointer_start(&mut self, event: PointerEvent) -> PointerOutcome {
        self.gesture_start = Some(event.position);

        match self.tool {
            ToolMode::Pen | ToolMode::Marker | ToolMode::Calligraphy => {
                let sample = event.sample(self.config.default_pressure);
                if self.document.start_drawing(sample, self.color, self.stroke_width, self.tool) {
                    PointerOutcome::Drawing
                } else {
                    PointerOutcome::Ignored
                }
            }
            ToolMode::Eraser => self.erase(event.position),
            ToolMode::Select => PointerOutcome::Ignored,
        }
    }

    fn pointer_move(&mut self, event: PointerEvent) -> PointerOutcome {
        if self.gesture_start.is_none() {
            return PointerOutcome::Ignored;
        }

        match self.tool {
            ToolMode::Pen | ToolMode::Marker | ToolMode::Calligraphy => {
                let sample = event.sample(self.config.default_pressure);
                if self.document.continue_drawing(sample) {
                    PointerOutcome::Drawing
                } else {
                    PointerOutcome::Ignored
                }
            }
            ToolMode::Eraser => self.erase(event.position),
            ToolMode::Select => PointerOutcome::Ignored,
        }
    }

    fn pointer_end(&mut self, event: PointerEvent) -> PointerOutcome {
        let Some(start) = self.gesture_start.take() else {
            return PointerOutcome::Ignored;
        };

        match self.tool {
            ToolMode::Pen | ToolMode::Marker | ToolMode::Calligraphy => self
                .document
                .end_drawing()
                .map_or(PointerOutcome::Ignored, PointerOutcome::Committed),
            ToolMode::Eraser => PointerOutcome::Ignored,
            ToolMode::Select => self.finish_selection(start, event.position),
        }
    }

    fn erase(&mut self, point: Point) -> PointerOutcome {
        self.document
            .erase_at(point, self.config.eraser_radius)
            .map_or(PointerOutcome::Ignored, PointerOutcome::Erased)
    }

    fn finish_selection(&mut self, start: Point, end: Point) -> PointerOutcome {
        if selection::is_tap(start, end, self.config.tap_threshold) {
            self.document
                .select_at(end, self.config.tap_radius)
                .map_or(PointerOutcome::Ignored, PointerOutcome::Toggled)
        } else {
            let rect = SelectionRect::from_corners(start, end);
            PointerOutcome::RectSelected(self.document.select_in_rect(&rect))
        }
    }

    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    pub fn clear(&mut self) -> bool {
        self.document.clear()
    }

    pub fn delete_selected(&mut self) -> usize {
        self.document.delete_selected()
    }

    pub fn remove_stroke(&mut self, id: StrokeId) -> bool {
        self.document.remove_stroke(id)
    }

    pub fn toggle_focus(&mut self, id: StrokeId) -> bool {
        self.document.toggle_focus(id)
    }

    /// Full-canvas SVG of the committed strokes.
    pub fn export_svg(&self, width: u32, height: u32) -> String {
        svg::export_svg(self.document.strokes(), width, height)
    }

    pub fn thumbnail_svg(&self) -> String {
        svg::thumbnail_svg(self.document.strokes())
    }

    /// Copy the committed strokes into a record for saving.
    ///
    /// With `base`, the record keeps that drawing's id, name and creation
    /// time; otherwise a new drawing named `name` is created.
    pub fn to_drawing(&self, base: Option<&Drawing>, name: &str, width: u32, height: u32) -> Drawing {
        let strokes = self.document.strokes().to_vec();
        match base {
            Some(existing) => existing.with_strokes(strokes, width, height),
            None => Drawing::new(name, strokes, width, height),
        }
    }

    /// Replace the document with a saved drawing's strokes.
    pub fn load_drawing(&mut self, drawing: &Drawing) {
        self.gesture_start = None;
        self.document.load_strokes(drawing.strokes.clone());
        log::debug!("Loaded drawing {} ({} strokes)", drawing.id, drawing.strokes.len());
    }
}
