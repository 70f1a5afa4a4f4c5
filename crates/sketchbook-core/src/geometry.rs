//! Point, bounding-box and path-smoothing math.

use crate::stroke::StrokePoint;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Offset used to turn a single tap into a visible dot.
pub const DOT_OFFSET: f64 = 0.1;

/// Minimum rendered width of a calligraphy segment.
pub const MIN_SEGMENT_WIDTH: f64 = 1.0;

/// Pressure gain applied to calligraphy segments.
pub const CALLIGRAPHY_PRESSURE_GAIN: f64 = 1.5;

/// Axis-aligned bounds of a stroke.
pub type BoundingBox = Rect;

/// Build the smoothed path for a sequence of samples.
///
/// Interior samples act as quadratic control points, with each curve ending
/// at the midpoint to the following sample. The final sample is reached with
/// a straight segment, so the path starts and ends exactly on the first and
/// last samples while passing near the others.
pub fn path_from_points(points: &[StrokePoint]) -> BezPath {
    let mut path = BezPath::new();

    match points {
        [] => {}
        [only] => {
            let p = only.position();
            path.move_to(p);
            path.line_to(p + Vec2::new(DOT_OFFSET, DOT_OFFSET));
        }
        [first, .., last] => {
            path.move_to(first.position());
            for pair in points[1..].windows(2) {
                let control = pair[0].position();
                let end = control.midpoint(pair[1].position());
                path.quad_to(control, end);
            }
            path.line_to(last.position());
        }
    }

    path
}

/// Min/max over all samples; no samples yields `Rect::ZERO`.
pub fn bounding_box(points: &[StrokePoint]) -> BoundingBox {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };

    let start = Rect::from_points(first.position(), first.position());
    points
        .iter()
        .skip(1)
        .fold(start, |acc, p| acc.union_pt(p.position()))
}

/// A user-dragged query rectangle with corners in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SelectionRect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle spanned by a drag gesture.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Min/max ordered form of the rectangle.
    pub fn normalized(&self) -> Rect {
        Rect::from_points(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }
}

/// Overlap test on both axes. Touching edges count as intersecting.
pub fn rect_intersects_box(rect: &SelectionRect, bounds: BoundingBox) -> bool {
    let r = rect.normalized();
    r.x0 <= bounds.x1 && r.x1 >= bounds.x0 && r.y0 <= bounds.y1 && r.y1 >= bounds.y0
}

/// Rendered width of the calligraphy segment between two samples.
pub fn calligraphy_segment_width(stroke_width: f64, a: &StrokePoint, b: &StrokePoint) -> f64 {
    let pressure = (a.pressure + b.pressure) / 2.0;
    (stroke_width * pressure * CALLIGRAPHY_PRESSURE_GAIN).max(MIN_SEGMENT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn pts(coords: &[(f64, f64)]) -> Vec<StrokePoint> {
        coords
            .iter()
            .map(|&(x, y)| StrokePoint::new(x, y, 0.5))
            .collect()
    }

    #[test]
    fn test_empty_path() {
        assert!(path_from_points(&[]).elements().is_empty());
    }

    #[test]
    fn test_single_point_is_dot() {
        let path = path_from_points(&pts(&[(3.0, 4.0)]));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(3.0, 4.0)),
                PathEl::LineTo(Point::new(3.0 + DOT_OFFSET, 4.0 + DOT_OFFSET)),
            ]
        );
    }

    #[test]
    fn test_two_points_is_straight() {
        let path = path_from_points(&pts(&[(0.0, 0.0), (10.0, 10.0)]));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_interior_points_become_quads() {
        let path = path_from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
                PathEl::QuadTo(Point::new(10.0, 10.0), Point::new(5.0, 10.0)),
                PathEl::LineTo(Point::new(0.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_bounding_box() {
        assert_eq!(bounding_box(&[]), Rect::ZERO);
        assert_eq!(bounding_box(&pts(&[(2.0, 3.0)])), Rect::new(2.0, 3.0, 2.0, 3.0));
        assert_eq!(
            bounding_box(&pts(&[(5.0, -1.0), (-2.0, 7.0), (1.0, 1.0)])),
            Rect::new(-2.0, -1.0, 5.0, 7.0)
        );
    }

    #[test]
    fn test_rect_intersection_is_inclusive() {
        let bounds = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!(rect_intersects_box(&SelectionRect::new(-1.0, -1.0, 6.0, 6.0), bounds));
        assert!(rect_intersects_box(&SelectionRect::new(5.0, 5.0, 9.0, 9.0), bounds));
        assert!(!rect_intersects_box(&SelectionRect::new(5.1, 0.0, 9.0, 9.0), bounds));
    }

    #[test]
    fn test_rect_corner_order_independent() {
        let bounds = Rect::new(0.0, 0.0, 5.0, 5.0);
        let a = SelectionRect::new(4.0, 4.0, 8.0, 8.0);
        let b = SelectionRect::new(8.0, 8.0, 4.0, 4.0);
        assert_eq!(a.normalized(), b.normalized());
        assert!(rect_intersects_box(&b, bounds));
    }

    #[test]
    fn test_calligraphy_segment_width() {
        let a = StrokePoint::new(0.0, 0.0, 0.2);
        let b = StrokePoint::new(1.0, 1.0, 0.4);
        assert!((calligraphy_segment_width(10.0, &a, &b) - 4.5).abs() < 1e-9);

        let faint = StrokePoint::new(0.0, 0.0, 0.0);
        assert_eq!(calligraphy_segment_width(10.0, &faint, &faint), MIN_SEGMENT_WIDTH);
    }
}
