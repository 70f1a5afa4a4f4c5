//! Sketchbook Core Library
//!
//! Platform-agnostic stroke document engine for the Sketchbook drawing app:
//! stroke capture, selection, undo history, SVG export and saved drawings.

pub mod config;
pub mod document;
pub mod drawing;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod selection;
pub mod storage;
pub mod stroke;
pub mod svg;
pub mod tools;

pub use config::EditorConfig;
pub use document::Document;
pub use drawing::Drawing;
pub use editor::{Editor, PointerOutcome};
pub use geometry::{BoundingBox, SelectionRect};
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::{PointerEvent, PointerPhase};
pub use storage::{Gallery, KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use stroke::{SerializableColor, Stroke, StrokeId, StrokePoint, StrokeStyle};
pub use tools::ToolMode;
