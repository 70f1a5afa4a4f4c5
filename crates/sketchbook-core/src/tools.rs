//! Tool modes available to the editor.

use crate::stroke::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Width multiplier applied when a calligraphy stroke starts.
pub const CALLIGRAPHY_WIDTH_FACTOR: f64 = 1.5;

/// Available tools.
///
/// Only the drawing tools map to a [`StrokeStyle`]; erasing and selecting
/// never produce strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolMode {
    #[default]
    Pen,
    Marker,
    Calligraphy,
    Eraser,
    Select,
}

impl ToolMode {
    /// Style of strokes drawn with this tool, if it draws at all.
    pub fn stroke_style(self) -> Option<StrokeStyle> {
        match self {
            ToolMode::Pen => Some(StrokeStyle::Pen),
            ToolMode::Marker => Some(StrokeStyle::Marker),
            ToolMode::Calligraphy => Some(StrokeStyle::Calligraphy),
            ToolMode::Eraser | ToolMode::Select => None,
        }
    }

    pub fn is_drawing(self) -> bool {
        self.stroke_style().is_some()
    }
}

impl From<StrokeStyle> for ToolMode {
    fn from(style: StrokeStyle) -> Self {
        match style {
            StrokeStyle::Pen => ToolMode::Pen,
            StrokeStyle::Marker => ToolMode::Marker,
            StrokeStyle::Calligraphy => ToolMode::Calligraphy,
        }
    }
}

impl StrokeStyle {
    /// Stored width for a stroke started at `active_width`.
    pub fn stored_width(self, active_width: f64) -> f64 {
        match self {
            StrokeStyle::Calligraphy => active_width * CALLIGRAPHY_WIDTH_FACTOR,
            StrokeStyle::Pen | StrokeStyle::Marker => active_width,
        }
    }
}
