//! Vello-based renderer implementation.

use crate::paint::{Paint, StrokeGeometry};
use crate::renderer::{RenderContext, RenderResult, Renderer, StrokeRenderer, paint_session};
use kurbo::{Affine, Circle, Rect};
use peniko::{BlendMode, Color, Compose, Fill, Mix};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
#[derive(Default)]
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn encode(&mut self, geometry: &StrokeGeometry, color: Color, transform: Affine) {
        match geometry {
            StrokeGeometry::Dot { center, radius } => {
                let circle = Circle::new(*center, *radius);
                self.scene.fill(Fill::NonZero, transform, color, None, &circle);
            }
            StrokeGeometry::Path { path, style } => {
                self.scene.stroke(style, transform, color, None, path);
            }
        }
    }
}

impl StrokeRenderer for VelloRenderer {
    fn fill_background(&mut self, rect: Rect, color: Color, transform: Affine) {
        self.scene.fill(Fill::NonZero, transform, color, None, &rect);
    }

    fn push_group(&mut self, clip: Rect, transform: Affine) {
        self.scene.push_layer(Mix::Normal, 1.0, transform, &clip);
    }

    fn pop_group(&mut self) {
        self.scene.pop_layer();
    }

    fn draw_stroke(&mut self, geometry: &StrokeGeometry, paint: Paint, transform: Affine) {
        match paint {
            Paint::Solid(color) => self.encode(geometry, color, transform),
            Paint::Clear => {
                // DestOut keeps the destination only where the source is empty,
                // so an opaque source punches the geometry out of the group.
                let erase = BlendMode::new(Mix::Normal, Compose::DestOut);
                self.scene.push_layer(erase, 1.0, transform, &geometry.bounds());
                self.encode(geometry, Color::BLACK, transform);
                self.scene.pop_layer();
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.scene.reset();
        paint_session(ctx, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use sketchpad_core::session::DrawSession;
    use sketchpad_core::stroke::StrokeColor;
    use sketchpad_core::tools::{EraserBehavior, Tool};

    fn session() -> DrawSession {
        DrawSession::new(StrokeColor::black(), 4.0, EraserBehavior::Clear)
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene() {
        let mut renderer = VelloRenderer::new();
        let session = session();
        let ctx = RenderContext::new(&session, Size::new(800.0, 600.0));

        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.scene().encoding().n_open_clips, 0);
    }

    #[test]
    fn test_build_scene_with_strokes() {
        let mut renderer = VelloRenderer::new();
        let mut session = session();
        session.start_drawing(Point::new(10.0, 10.0));
        session.continue_drawing(Point::new(50.0, 40.0));
        session.finish_drawing();
        session.select_tool(Tool::Eraser);
        session.start_drawing(Point::new(30.0, 0.0));
        session.continue_drawing(Point::new(30.0, 60.0));
        session.finish_drawing();
        session.start_drawing(Point::new(5.0, 5.0));

        let ctx = RenderContext::new(&session, Size::new(800.0, 600.0))
            .with_background(Color::WHITE);
        renderer.build_scene(&ctx).unwrap();

        let encoding = renderer.scene().encoding();
        assert!(encoding.n_paths >= 4);
        assert_eq!(encoding.n_open_clips, 0);
    }

    #[test]
    fn test_eraser_stroke_gets_its_own_layer() {
        let mut session = session();
        session.start_drawing(Point::new(10.0, 10.0));
        session.continue_drawing(Point::new(50.0, 40.0));
        session.finish_drawing();

        let mut renderer = VelloRenderer::new();
        renderer
            .build_scene(&RenderContext::new(&session, Size::new(100.0, 100.0)))
            .unwrap();
        let group_only = renderer.scene().encoding().n_clips;
        assert!(group_only > 0);

        session.select_tool(Tool::Eraser);
        session.start_drawing(Point::new(30.0, 0.0));
        session.continue_drawing(Point::new(30.0, 60.0));
        session.finish_drawing();

        renderer
            .build_scene(&RenderContext::new(&session, Size::new(100.0, 100.0)))
            .unwrap();
        let encoding = renderer.scene().encoding();
        // Outer group plus one DestOut layer.
        assert_eq!(encoding.n_clips, group_only * 2);
        assert_eq!(encoding.n_open_clips, 0);
    }

    #[test]
    fn test_take_scene_leaves_empty() {
        let mut renderer = VelloRenderer::new();
        let session = session();
        renderer
            .build_scene(&RenderContext::new(&session, Size::new(100.0, 100.0)))
            .unwrap();
        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_invalid_viewport_is_error() {
        let mut renderer = VelloRenderer::new();
        let session = session();
        let ctx = RenderContext::new(&session, Size::new(-1.0, 100.0));
        assert!(renderer.build_scene(&ctx).is_err());
    }
}
