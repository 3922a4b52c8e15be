//! Backend-neutral stroke geometry and paint.

use kurbo::{BezPath, Cap, Circle, Join, Point, Rect, Shape, Stroke};
use peniko::Color;
use sketchpad_core::stroke::{self, StrokeColor, StrokeStyle};
use sketchpad_core::tools::RenderMode;

/// How a stroke's geometry reaches the surface.
#[derive(Debug, Clone, Copy)]
pub enum Paint {
    /// Source-over with the given color.
    Solid(Color),
    /// Destination becomes transparent under the geometry.
    Clear,
}

impl Paint {
    /// Resolve a render mode against a stroke's stored color.
    pub fn resolve(mode: RenderMode, color: StrokeColor) -> Self {
        mode.paint_color(color).map_or(Paint::Clear, Paint::Solid)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Paint::Clear)
    }
}

/// What gets painted for a stroke.
#[derive(Debug, Clone)]
pub enum StrokeGeometry {
    /// A tap: filled circle with the stroke's width as diameter.
    Dot { center: Point, radius: f64 },
    /// Polyline stroked with round caps and joins.
    Path { path: BezPath, style: Stroke },
}

impl StrokeGeometry {
    /// Geometry for a point sequence; `None` when there are no points.
    pub fn new(points: &[Point], style: &StrokeStyle) -> Option<Self> {
        let first = *points.first()?;
        if stroke::is_dot(points) {
            return Some(StrokeGeometry::Dot {
                center: first,
                radius: style.width / 2.0,
            });
        }
        Some(StrokeGeometry::Path {
            path: stroke::polyline_path(points),
            style: line_style(style),
        })
    }

    /// Area the geometry can touch.
    pub fn bounds(&self) -> Rect {
        match self {
            StrokeGeometry::Dot { center, radius } => Circle::new(*center, *radius).bounding_box(),
            StrokeGeometry::Path { path, style } => {
                let half = style.width / 2.0;
                path.bounding_box().inflate(half, half)
            }
        }
    }
}

/// Round-capped, round-joined line style with the stroke's dashes.
pub fn line_style(style: &StrokeStyle) -> Stroke {
    let line = Stroke::new(style.width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    match &style.effect {
        Some(effect) if !effect.dashes.is_empty() => {
            line.with_dashes(effect.offset, &effect.dashes)
        }
        _ => line,
    }
}
