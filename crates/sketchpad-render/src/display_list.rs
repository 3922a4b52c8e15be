//! Headless renderer that records paint operations.

use crate::paint::{Paint, StrokeGeometry};
use crate::renderer::{RenderContext, RenderResult, Renderer, StrokeRenderer, paint_session};
use kurbo::{Affine, Rect};
use peniko::Color;

/// A recorded drawing command.
#[derive(Debug, Clone)]
pub enum PaintOp {
    FillBackground { rect: Rect, color: Color, transform: Affine },
    PushGroup { clip: Rect, transform: Affine },
    DrawStroke { geometry: StrokeGeometry, paint: Paint, transform: Affine },
    PopGroup,
}

/// Records a frame as a flat list of [`PaintOp`]s.
///
/// Useful for hosts that rasterize themselves and for tests.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    ops: Vec<PaintOp>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations of the last built frame.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Take the recorded operations, leaving the list empty.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }
}

impl StrokeRenderer for DisplayListRenderer {
    fn fill_background(&mut self, rect: Rect, color: Color, transform: Affine) {
        self.ops.push(PaintOp::FillBackground { rect, color, transform });
    }

    fn push_group(&mut self, clip: Rect, transform: Affine) {
        self.ops.push(PaintOp::PushGroup { clip, transform });
    }

    fn pop_group(&mut self) {
        self.ops.push(PaintOp::PopGroup);
    }

    fn draw_stroke(&mut self, geometry: &StrokeGeometry, paint: Paint, transform: Affine) {
        self.ops.push(PaintOp::DrawStroke {
            geometry: geometry.clone(),
            paint,
            transform,
        });
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.ops.clear();
        paint_session(ctx, self)
    }
}
