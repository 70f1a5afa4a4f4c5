//! Persisted drawing records.

use crate::stroke::Stroke;
use crate::svg;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A saved drawing.
///
/// `strokes` is the source of truth; `thumbnail_svg` is a cache rebuilt on
/// every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: String,
    pub name: String,
    pub strokes: Vec<Stroke>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    #[serde(default)]
    pub thumbnail_svg: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Drawing {
    /// Create a new, not yet saved drawing.
    pub fn new(name: impl Into<String>, strokes: Vec<Stroke>, canvas_width: u32, canvas_height: u32) -> Self {
        let now = now_millis();
        let thumbnail_svg = svg::thumbnail_svg(&strokes);
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            strokes,
            canvas_width,
            canvas_height,
            thumbnail_svg,
            created_at: now,
            updated_at: now,
        }
    }

    /// Same record with new content, keeping id, name and creation time.
    pub fn with_strokes(&self, strokes: Vec<Stroke>, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            strokes,
            canvas_width,
            canvas_height,
            ..self.clone()
        }
    }

    /// Recompute the thumbnail and bump the modification time.
    pub fn touch(&mut self) {
        self.thumbnail_svg = svg::thumbnail_svg(&self.strokes);
        self.updated_at = now_millis().max(self.created_at);
    }

    /// Full-canvas SVG export of this drawing.
    pub fn export_svg(&self) -> String {
        svg::export_svg(&self.strokes, self.canvas_width, self.canvas_height)
    }

    /// Serialize the drawing to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a drawing from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
