//! Strokes: recorded samples plus appearance and cached path data.

use crate::geometry::{self, BoundingBox};
use kurbo::{BezPath, Point};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Normalized force in `[0, 1]`.
    pub pressure: f64,
}

impl StrokePoint {
    /// Create a sample, clamping pressure into `[0, 1]`.
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: pressure.clamp(0.0, 1.0),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// `#rrggbb`, alpha excluded.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Visual style of a committed stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Pen,
    Marker,
    Calligraphy,
}

/// One segment of a stroke as the renderer draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub width: f64,
}

/// Persisted form of a stroke; path data is derived on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrokeRecord {
    id: StrokeId,
    points: Vec<StrokePoint>,
    color: SerializableColor,
    stroke_width: f64,
    style: StrokeStyle,
}

impl From<StrokeRecord> for Stroke {
    fn from(record: StrokeRecord) -> Self {
        let path = geometry::path_from_points(&record.points);
        Self {
            id: record.id,
            points: record.points,
            color: record.color,
            stroke_width: record.stroke_width,
            style: record.style,
            path,
        }
    }
}

/// One continuous gesture's samples with appearance and smoothed path.
///
/// Samples can only be appended through [`Stroke::push`], which keeps the
/// cached path in step with the points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StrokeRecord")]
pub struct Stroke {
    id: StrokeId,
    points: Vec<StrokePoint>,
    pub color: SerializableColor,
    pub stroke_width: f64,
    pub style: StrokeStyle,
    #[serde(skip_serializing)]
    path: BezPath,
}

impl Stroke {
    /// Start a stroke from its first sample.
    pub fn new(first: StrokePoint, color: SerializableColor, stroke_width: f64, style: StrokeStyle) -> Self {
        Self::from_points(vec![first], color, stroke_width, style)
    }

    /// Create a stroke from an existing sample sequence.
    pub fn from_points(
        points: Vec<StrokePoint>,
        color: SerializableColor,
        stroke_width: f64,
        style: StrokeStyle,
    ) -> Self {
        let path = geometry::path_from_points(&points);
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            stroke_width,
            style,
            path,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Smoothed path data, always derived from the current points.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a sample and rebuild the path from the full sequence.
    pub fn push(&mut self, point: StrokePoint) {
        self.points.push(point);
        // Full rebuild; cost grows with stroke length.
        self.path = geometry::path_from_points(&self.points);
    }

    pub fn bounds(&self) -> BoundingBox {
        geometry::bounding_box(&self.points)
    }

    /// Segments between adjacent samples with their rendered widths.
    ///
    /// Calligraphy strokes vary width with the pair's average pressure;
    /// pen and marker strokes ignore pressure.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(move |pair| {
            let width = match self.style {
                StrokeStyle::Calligraphy => {
                    geometry::calligraphy_segment_width(self.stroke_width, &pair[0], &pair[1])
                }
                StrokeStyle::Pen | StrokeStyle::Marker => self.stroke_width,
            };
            Segment {
                start: pair[0].position(),
                end: pair[1].position(),
                width,
            }
        })
    }
}

impl PartialEq for Stroke {
    fn eq(&self, other: &Self) -> bool {
        // Path data is derived from the points.
        self.id == other.id
            && self.points == other.points
            && self.color == other.color
            && self.stroke_width == other.stroke_width
            && self.style == other.style
    }
}
