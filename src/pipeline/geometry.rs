//! Page primitives for the table finder, independent of pdfium.
//!
//! [`crate::pipeline::pdf`] reads glyph boxes and path segments from pdfium,
//! flips them to a top-left origin and hands them to this module, which turns
//! them into `pdfplumber` characters, lines and rectangles.
//!
//! Paths are walked segment by segment: a table grid painted as a single
//! path object yields every inner ruling, not just its outer bounds.

use pdfplumber_core::{BBox, Char, Color, Line, LineOrientation, Rect, TextDirection};

/// Coordinates closer than this (pt) count as equal when deciding whether a
/// segment is horizontal or vertical.
const AXIS_TOLERANCE: f64 = 0.5;

/// Build a pdfplumber character from a glyph box in top-left coordinates.
pub fn glyph(text: impl Into<String>, bbox: BBox, fontname: impl Into<String>, size: f64) -> Char {
    Char {
        text: text.into(),
        bbox,
        fontname: fontname.into(),
        size,
        doctop: bbox.top,
        upright: true,
        direction: TextDirection::Ltr,
        stroking_color: None,
        non_stroking_color: None,
        ctm: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        char_code: 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    CurveTo,
}

/// One path segment end point, already in page coordinates (top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub kind: SegmentKind,
    pub x: f64,
    pub y: f64,
    /// The segment closes its subpath back to the subpath start.
    pub close: bool,
}

impl PathPoint {
    pub fn move_to(x: f64, y: f64) -> Self {
        Self { kind: SegmentKind::MoveTo, x, y, close: false }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        Self { kind: SegmentKind::LineTo, x, y, close: false }
    }

    pub fn closed(mut self) -> Self {
        self.close = true;
        self
    }
}

/// How a path is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPaint {
    pub line_width: f64,
    pub stroke: bool,
    pub fill: bool,
}

/// Straight rulings and rectangles found in one path object.
#[derive(Debug, Clone, Default)]
pub struct PathShapes {
    pub lines: Vec<Line>,
    pub rects: Vec<Rect>,
}

/// Split `points` into subpaths and classify each one.
///
/// A closed four-sided axis-aligned subpath becomes a [`Rect`]. Every other
/// straight horizontal or vertical segment becomes a [`Line`]. Diagonals and
/// curves yield nothing. Unpainted paths (clip paths) yield nothing.
pub fn shapes_from_path(points: &[PathPoint], paint: PathPaint) -> PathShapes {
    let mut shapes = PathShapes::default();
    if !paint.stroke && !paint.fill {
        return shapes;
    }

    for subpath in split_subpaths(points) {
        if let Some(rect) = as_rect(&subpath, paint) {
            shapes.rects.push(rect);
            continue;
        }
        for pair in subpath.windows(2) {
            if pair[1].kind == SegmentKind::LineTo {
                shapes.lines.extend(axis_line(pair[0], pair[1], paint));
            }
        }
        if let (Some(first), Some(last)) = (subpath.first(), subpath.last()) {
            if last.close {
                shapes.lines.extend(axis_line(*last, *first, paint));
            }
        }
    }
    shapes
}

fn split_subpaths(points: &[PathPoint]) -> Vec<Vec<PathPoint>> {
    let mut subpaths: Vec<Vec<PathPoint>> = Vec::new();
    for point in points {
        match subpaths.last_mut() {
            Some(current) if point.kind != SegmentKind::MoveTo => current.push(*point),
            _ => subpaths.push(vec![*point]),
        }
    }
    subpaths
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= AXIS_TOLERANCE
}

fn axis_line(from: PathPoint, to: PathPoint, paint: PathPaint) -> Option<Line> {
    let orientation = if near(from.y, to.y) && !near(from.x, to.x) {
        LineOrientation::Horizontal
    } else if near(from.x, to.x) && !near(from.y, to.y) {
        LineOrientation::Vertical
    } else {
        return None;
    };

    Some(Line {
        x0: from.x.min(to.x),
        top: from.y.min(to.y),
        x1: from.x.max(to.x),
        bottom: from.y.max(to.y),
        line_width: paint.line_width,
        stroke_color: Color::black(),
        orientation,
    })
}

/// `re` operators and hand-drawn boxes: four corners, every side on an axis.
fn as_rect(subpath: &[PathPoint], paint: PathPaint) -> Option<Rect> {
    if subpath.iter().any(|p| p.kind == SegmentKind::CurveTo) {
        return None;
    }

    let mut corners: Vec<(f64, f64)> = subpath.iter().map(|p| (p.x, p.y)).collect();
    let explicitly_closed = corners.len() == 5 && near(corners[0].0, corners[4].0) && near(corners[0].1, corners[4].1);
    if explicitly_closed {
        corners.pop();
    } else if !(corners.len() == 4 && subpath.last().is_some_and(|p| p.close)) {
        return None;
    }

    let sides_on_axis = (0..4).all(|i| {
        let (ax, ay) = corners[i];
        let (bx, by) = corners[(i + 1) % 4];
        near(ax, bx) || near(ay, by)
    });
    if !sides_on_axis {
        return None;
    }

    let x0 = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let x1 = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let top = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let bottom = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

    Some(Rect {
        x0,
        top,
        x1,
        bottom,
        line_width: paint.line_width,
        stroke: paint.stroke,
        fill: paint.fill,
        stroke_color: Color::black(),
        fill_color: Color::black(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STROKED: PathPaint = PathPaint {
        line_width: 0.5,
        stroke: true,
        fill: false,
    };

    /// A 2×2 grid drawn as one path: three horizontal and three vertical
    /// rulings, each its own subpath.
    fn one_path_grid() -> Vec<PathPoint> {
        let mut points = Vec::new();
        for y in [100.0, 120.0, 140.0] {
            points.push(PathPoint::move_to(50.0, y));
            points.push(PathPoint::line_to(350.0, y));
        }
        for x in [50.0, 200.0, 350.0] {
            points.push(PathPoint::move_to(x, 100.0));
            points.push(PathPoint::line_to(x, 140.0));
        }
        points
    }

    #[test]
    fn grid_path_keeps_every_inner_ruling() {
        let shapes = shapes_from_path(&one_path_grid(), STROKED);
        assert!(shapes.rects.is_empty());
        assert_eq!(shapes.lines.len(), 6);

        let horizontal: Vec<f64> = shapes
            .lines
            .iter()
            .filter(|l| matches!(l.orientation, LineOrientation::Horizontal))
            .map(|l| l.top)
            .collect();
        assert_eq!(horizontal, vec![100.0, 120.0, 140.0]);
    }

    #[test]
    fn closed_box_is_a_rect() {
        let points = vec![
            PathPoint::move_to(10.0, 10.0),
            PathPoint::line_to(110.0, 10.0),
            PathPoint::line_to(110.0, 40.0),
            PathPoint::line_to(10.0, 40.0).closed(),
        ];
        let shapes = shapes_from_path(&points, STROKED);
        assert!(shapes.lines.is_empty());
        assert_eq!(shapes.rects.len(), 1);
        let r = &shapes.rects[0];
        assert_eq!((r.x0, r.top, r.x1, r.bottom), (10.0, 10.0, 110.0, 40.0));
    }

    #[test]
    fn several_rects_in_one_path_stay_separate() {
        let mut points = Vec::new();
        for x in [10.0, 60.0] {
            points.push(PathPoint::move_to(x, 10.0));
            points.push(PathPoint::line_to(x + 50.0, 10.0));
            points.push(PathPoint::line_to(x + 50.0, 30.0));
            points.push(PathPoint::line_to(x, 30.0));
            points.push(PathPoint::line_to(x, 10.0));
        }
        let shapes = shapes_from_path(&points, STROKED);
        assert_eq!(shapes.rects.len(), 2);
    }

    #[test]
    fn curves_and_diagonals_are_not_rulings() {
        let points = vec![
            PathPoint::move_to(0.0, 0.0),
            PathPoint::line_to(30.0, 30.0),
            PathPoint {
                kind: SegmentKind::CurveTo,
                x: 60.0,
                y: 0.0,
                close: false,
            },
        ];
        let shapes = shapes_from_path(&points, STROKED);
        assert!(shapes.lines.is_empty());
        assert!(shapes.rects.is_empty());
    }

    #[test]
    fn unpainted_paths_are_ignored() {
        let paint = PathPaint {
            line_width: 1.0,
            stroke: false,
            fill: false,
        };
        let shapes = shapes_from_path(&one_path_grid(), paint);
        assert!(shapes.lines.is_empty());
    }

    #[test]
    fn open_polyline_closing_segment_is_added() {
        let points = vec![
            PathPoint::move_to(0.0, 0.0),
            PathPoint::line_to(40.0, 0.0),
            PathPoint::line_to(40.0, 40.0).closed(),
        ];
        let shapes = shapes_from_path(&points, STROKED);
        // two axis segments; the closing diagonal is dropped
        assert_eq!(shapes.lines.len(), 2);
    }
}
