//! Renderer trait abstraction.

use crate::paint::{Paint, StrokeGeometry};
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use sketchpad_core::session::DrawSession;
use sketchpad_core::stroke::StrokeStyle;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport: {0:?}")]
    InvalidViewport(Size),
    #[error("Invalid scale factor: {0}")]
    InvalidScaleFactor(f64),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The session to render.
    pub session: &'a DrawSession,
    /// Viewport size in surface units.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Painted below the stroke group; erasing never reaches it.
    pub background_color: Option<Color>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(session: &'a DrawSession, viewport_size: Size) -> Self {
        Self {
            session,
            viewport_size,
            scale_factor: 1.0,
            background_color: None,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Surface-to-device transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Viewport in surface units.
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.viewport_size)
    }

    pub fn validate(&self) -> RenderResult<()> {
        let size = self.viewport_size;
        let finite = size.width.is_finite() && size.height.is_finite();
        if !(finite && size.width > 0.0 && size.height > 0.0) {
            return Err(RendererError::InvalidViewport(size));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(RendererError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, a recorded display list, or other engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; previous frame contents are discarded.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}

/// Drawing primitives a backend provides to [`paint_session`].
pub trait StrokeRenderer {
    /// Fill `rect` outside of any group.
    fn fill_background(&mut self, rect: Rect, color: Color, transform: Affine);

    /// Begin an isolated compositing group clipped to `clip`.
    fn push_group(&mut self, clip: Rect, transform: Affine);

    /// Composite the innermost group onto its parent.
    fn pop_group(&mut self);

    /// Paint or erase one stroke.
    fn draw_stroke(&mut self, geometry: &StrokeGeometry, paint: Paint, transform: Affine);
}

/// Paint a session onto a backend.
///
/// Order: background, then one isolated group holding every committed stroke
/// (oldest first) followed by the in-progress stroke on top.
pub fn paint_session<R: StrokeRenderer + ?Sized>(
    ctx: &RenderContext,
    target: &mut R,
) -> RenderResult<()> {
    if let Err(err) = ctx.validate() {
        log::warn!("Skipping frame: {err}");
        return Err(err);
    }
    let transform = ctx.transform();
    let viewport = ctx.viewport_rect();

    if let Some(color) = ctx.background_color {
        target.fill_background(viewport, color, transform);
    }

    target.push_group(viewport, transform);
    for stroke in ctx.session.committed_strokes() {
        paint_stroke(ctx.session, stroke.points(), stroke.style(), transform, target);
    }
    if let Some(preview) = ctx.session.in_progress_stroke() {
        paint_stroke(ctx.session, preview.points, &preview.style, transform, target);
    }
    target.pop_group();
    Ok(())
}

fn paint_stroke<R: StrokeRenderer + ?Sized>(
    session: &DrawSession,
    points: &[Point],
    style: &StrokeStyle,
    transform: Affine,
    target: &mut R,
) {
    let Some(geometry) = StrokeGeometry::new(points, style) else {
        return;
    };
    let paint = Paint::resolve(session.render_mode(style.tool), style.color);
    target.draw_stroke(&geometry, paint, transform);
}
