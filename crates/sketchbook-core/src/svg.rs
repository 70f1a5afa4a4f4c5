//! SVG export and thumbnail serialization.
//!
//! Output is a pure function of its input: numbers are written with fixed
//! precision so identical strokes always produce identical bytes. Nothing
//! here parses SVG; saved drawings keep their strokes as the source of truth.

use crate::stroke::{SerializableColor, Stroke, StrokeStyle};
use ::svg::Document;
use ::svg::node::element::{Line, Path, Rectangle};
use kurbo::{BezPath, PathEl, Point, Rect};

/// Decimal places used for full exports.
pub const EXPORT_PRECISION: usize = 2;
/// Decimal places used for thumbnails.
pub const THUMBNAIL_PRECISION: usize = 1;
/// Strokes considered when building a thumbnail.
pub const THUMBNAIL_MAX_STROKES: usize = 10;
/// Space added around the thumbnail content on each side.
pub const THUMBNAIL_PADDING: f64 = 20.0;
/// Opacity of each marker segment.
pub const MARKER_OPACITY: f64 = 0.5;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const BACKGROUND: &str = "#ffffff";

/// Serialize strokes into a full-canvas SVG document.
pub fn export_svg(strokes: &[Stroke], width: u32, height: u32) -> String {
    let background = Rectangle::new()
        .set("x", "0")
        .set("y", "0")
        .set("width", width.to_string())
        .set("height", height.to_string())
        .set("fill", BACKGROUND);

    let document = Document::new()
        .set("width", width.to_string())
        .set("height", height.to_string())
        .set("viewBox", format!("0 0 {width} {height}"))
        .add(background);

    let document = strokes
        .iter()
        .fold(document, |doc, stroke| add_stroke(doc, stroke, EXPORT_PRECISION));
    render(&document)
}

/// Serialize a cropped preview of the first strokes.
///
/// The view box is the padded union of those strokes' bounds. Returns an
/// empty string when there are no strokes.
pub fn thumbnail_svg(strokes: &[Stroke]) -> String {
    let strokes = &strokes[..strokes.len().min(THUMBNAIL_MAX_STROKES)];
    let Some(bounds) = strokes.iter().map(Stroke::bounds).reduce(|acc, b| acc.union(b)) else {
        return String::new();
    };
    let view = bounds.inflate(THUMBNAIL_PADDING, THUMBNAIL_PADDING);
    let p = THUMBNAIL_PRECISION;

    let background = Rectangle::new()
        .set("x", num(view.x0, p))
        .set("y", num(view.y0, p))
        .set("width", num(view.width(), p))
        .set("height", num(view.height(), p))
        .set("fill", BACKGROUND);

    let document = Document::new()
        .set("viewBox", view_box(view, p))
        .set("preserveAspectRatio", "xMidYMid meet")
        .add(background);

    let document = strokes.iter().fold(document, |doc, stroke| add_stroke(doc, stroke, p));
    render(&document)
}

fn render(document: &Document) -> String {
    format!("{XML_HEADER}\n{document}\n")
}

fn add_stroke(document: Document, stroke: &Stroke, precision: usize) -> Document {
    if stroke.style == StrokeStyle::Marker && stroke.len() >= 2 {
        // One line per pair so overlaps build up density.
        stroke.points().windows(2).fold(document, |doc, pair| {
            doc.add(marker_segment(stroke, pair[0].position(), pair[1].position(), precision))
        })
    } else {
        let path = Path::new()
            .set("d", path_data(stroke.path(), precision))
            .set("stroke-width", num(stroke.stroke_width, precision))
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round")
            .set("fill", "none");
        let path = paint(stroke.color)
            .into_iter()
            .fold(path, |el, (name, value)| el.set(name, value));
        document.add(path)
    }
}

fn marker_segment(stroke: &Stroke, a: Point, b: Point, precision: usize) -> Line {
    let line = Line::new()
        .set("x1", num(a.x, precision))
        .set("y1", num(a.y, precision))
        .set("x2", num(b.x, precision))
        .set("y2", num(b.y, precision))
        .set("stroke-width", num(stroke.stroke_width, precision))
        .set("stroke-linecap", "round")
        .set("opacity", MARKER_OPACITY.to_string());
    paint(stroke.color)
        .into_iter()
        .fold(line, |el, (name, value)| el.set(name, value))
}

/// `stroke` attribute, plus `stroke-opacity` for translucent colors.
fn paint(color: SerializableColor) -> Vec<(&'static str, String)> {
    let mut attributes = vec![("stroke", color.to_hex())];
    if color.a != u8::MAX {
        attributes.push(("stroke-opacity", num(color.opacity(), 2)));
    }
    attributes
}

/// SVG path data for `path` with fixed precision.
pub fn path_data(path: &BezPath, precision: usize) -> String {
    let pt = |p: Point| format!("{} {}", num(p.x, precision), num(p.y, precision));

    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => format!("M {}", pt(p)),
            PathEl::LineTo(p) => format!("L {}", pt(p)),
            PathEl::QuadTo(c, p) => format!("Q {} {}", pt(c), pt(p)),
            PathEl::CurveTo(c1, c2, p) => format!("C {} {} {}", pt(c1), pt(c2), pt(p)),
            PathEl::ClosePath => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn view_box(rect: Rect, precision: usize) -> String {
    format!(
        "{} {} {} {}",
        num(rect.x0, precision),
        num(rect.y0, precision),
        num(rect.width(), precision),
        num(rect.height(), precision)
    )
}

fn num(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    // Avoid "-0.00" for values that round to zero.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}
