//! Pointer events delivered by the input surface.

use crate::stroke::StrokePoint;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    /// The gesture was interrupted; handled like `End`.
    Cancel,
}

/// A pointer sample in local canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    /// Reported force, or `None` when the device has no pressure sensor.
    pub pressure: Option<f64>,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            pressure: None,
        }
    }

    pub fn start(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Start, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }

    pub fn end(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::End, x, y)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Cancel, x, y)
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Convert to a stroke sample, using `default_pressure` when the device
    /// reported none.
    pub fn sample(&self, default_pressure: f64) -> StrokePoint {
        StrokePoint::new(
            self.position.x,
            self.position.y,
            self.pressure.unwrap_or(default_pressure),
        )
    }
}
