//! Stroke records and their style snapshot.

use crate::tools::Tool;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for committed strokes.
pub type StrokeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StrokeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Same RGB channels with the alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for StrokeColor {
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

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Dash pattern handed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEffect {
    /// Alternating on/off lengths in surface units.
    pub dashes: Vec<f64>,
    /// Phase offset into the pattern.
    #[serde(default)]
    pub offset: f64,
}

impl LineEffect {
    /// Regular dashes.
    pub fn dashed(on: f64, off: f64) -> Self {
        Self {
            dashes: vec![on, off],
            offset: 0.0,
        }
    }

    /// Round dots spaced for the given stroke width (relies on round caps).
    pub fn dotted(width: f64) -> Self {
        Self {
            dashes: vec![0.0, width * 2.0],
            offset: 0.0,
        }
    }
}

/// Style captured when a stroke is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Stored color; effective alpha is resolved per tool when rendering.
    pub color: StrokeColor,
    /// Stroke width in surface units.
    pub width: f64,
    /// Optional dash pattern.
    pub effect: Option<LineEffect>,
    /// Tool active when the stroke was finished.
    pub tool: Tool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: StrokeColor::black(),
            width: 4.0,
            effect: None,
            tool: Tool::default(),
        }
    }
}

/// An immutable committed stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    style: StrokeStyle,
}

impl Stroke {
    /// Freeze a point sequence into a stroke.
    ///
    /// Returns `None` for an empty sequence; every stroke has at least one point.
    pub fn new(points: Vec<Point>, style: StrokeStyle) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
            style,
        })
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn tool(&self) -> Tool {
        self.style.tool
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a constructed stroke.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when every point coincides (a tap).
    pub fn is_dot(&self) -> bool {
        is_dot(&self.points)
    }

    /// Bounding box of the sampled points (stroke width not included).
    pub fn bounds(&self) -> Rect {
        bounds(&self.points)
    }

    /// Straight `line_to` segments between consecutive points.
    pub fn to_path(&self) -> BezPath {
        polyline_path(&self.points)
    }
}

/// True when the slice has no two distinct points.
pub fn is_dot(points: &[Point]) -> bool {
    match points.first() {
        Some(first) => points.iter().all(|p| p == first),
        None => false,
    }
}

/// Axis-aligned bounds of a point slice; `Rect::ZERO` when empty.
pub fn bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Build a polyline path.
pub fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path
}

/// Ramer-Douglas-Peucker line simplification.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;
    for (i, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = simplify(&points[..=max_index], tolerance);
        let right = simplify(&points[max_index..], tolerance);
        // Junction point appears in both halves.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let line = line_end - line_start;
    let len_sq = line.hypot2();
    if len_sq < f64::EPSILON {
        return (point - line_start).hypot();
    }
    (point - line_start).cross(line).abs() / len_sq.sqrt()
}
