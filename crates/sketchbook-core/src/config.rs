//! Editor tuning values.

use crate::history::MAX_UNDO_HISTORY;
use crate::selection::{ERASER_RADIUS, TAP_RADIUS, TAP_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Pressure assumed when the device reports no force.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Radii, thresholds and limits used by the editor.
///
/// Missing fields fall back to their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo states kept before the oldest is evicted.
    pub history_capacity: usize,
    pub eraser_radius: f64,
    pub tap_radius: f64,
    /// Pointer travel below which a select gesture is a tap.
    pub tap_threshold: f64,
    pub default_pressure: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: MAX_UNDO_HISTORY,
            eraser_radius: ERASER_RADIUS,
            tap_radius: TAP_RADIUS,
            tap_threshold: TAP_THRESHOLD,
            default_pressure: DEFAULT_PRESSURE,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
