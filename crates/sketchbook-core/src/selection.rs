//! Hit-testing and rectangle queries over committed strokes.

use crate::geometry::{self, SelectionRect};
use crate::stroke::{Stroke, StrokeId};
use kurbo::Point;

/// Pointer travel below which a select gesture counts as a tap.
pub const TAP_THRESHOLD: f64 = 5.0;
/// Search radius for tap selection.
pub const TAP_RADIUS: f64 = 30.0;
/// Search radius for the eraser.
pub const ERASER_RADIUS: f64 = 20.0;

/// Find the stroke owning the sample closest to `point` within `radius`.
///
/// Every sample of every stroke is scanned. A sample exactly `radius` away
/// is a hit. Ties keep the first stroke in document order.
pub fn nearest_stroke(point: Point, strokes: &[Stroke], radius: f64) -> Option<StrokeId> {
    let mut best: Option<(StrokeId, f64)> = None;

    for stroke in strokes {
        for sample in stroke.points() {
            let dist = sample.position().distance(point);
            if dist > radius {
                continue;
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((stroke.id(), dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

/// Ids of every stroke whose bounds intersect `rect`, in document order.
pub fn strokes_in_rect(rect: &SelectionRect, strokes: &[Stroke]) -> Vec<StrokeId> {
    strokes
        .iter()
        .filter(|s| geometry::rect_intersects_box(rect, s.bounds()))
        .map(Stroke::id)
        .collect()
}

/// Whether a gesture from `start` to `end` is a tap rather than a drag.
pub fn is_tap(start: Point, end: Point, threshold: f64) -> bool {
    start.distance(end) < threshold
}
