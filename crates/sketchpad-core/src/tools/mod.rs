//! Drawing tools and their render-mode mapping.

use crate::stroke::StrokeColor;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Fixed opacity for highlighter strokes, overriding any stored alpha.
pub const HIGHLIGHTER_ALPHA: f32 = 0.3;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Opaque stroke.
    #[default]
    Pencil,
    /// Translucent stroke at [`HIGHLIGHTER_ALPHA`].
    Highlighter,
    /// Removes underlying pixels instead of painting over them.
    Eraser,
}

impl Tool {
    /// All tools, in toolbar order.
    pub const ALL: [Tool; 3] = [Tool::Pencil, Tool::Highlighter, Tool::Eraser];

    /// Display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Highlighter => "Highlighter",
            Tool::Eraser => "Eraser",
        }
    }

    /// Resolve how strokes made with this tool are painted.
    pub fn render_mode(self, eraser: EraserBehavior) -> RenderMode {
        match self {
            Tool::Pencil => RenderMode::Opaque,
            Tool::Highlighter => RenderMode::Translucent {
                alpha: HIGHLIGHTER_ALPHA,
            },
            Tool::Eraser => match eraser {
                EraserBehavior::Clear => RenderMode::Erase,
                EraserBehavior::PaintBackground(color) => RenderMode::Cover(color),
            },
        }
    }
}

/// How the eraser reaches the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraserBehavior {
    /// Clear destination pixels inside the session's isolated group.
    #[default]
    Clear,
    /// Paint the given background color, for hosts without isolated compositing.
    PaintBackground(StrokeColor),
}

/// Concrete paint operation derived from a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderMode {
    /// Stored color at full opacity.
    Opaque,
    /// Stored color at a fixed alpha.
    Translucent { alpha: f32 },
    /// Clear-blend: destination becomes transparent under the path.
    Erase,
    /// Opaque fill with a fixed color regardless of the stroke's own.
    Cover(StrokeColor),
}

impl RenderMode {
    /// Effective color to paint with, or `None` when the mode erases.
    pub fn paint_color(self, color: StrokeColor) -> Option<Color> {
        match self {
            RenderMode::Opaque => Some(color.with_alpha(255).into()),
            RenderMode::Translucent { alpha } => {
                let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                Some(color.with_alpha(a).into())
            }
            RenderMode::Erase => None,
            RenderMode::Cover(cover) => Some(cover.with_alpha(255).into()),
        }
    }

    /// Whether this mode removes pixels.
    pub fn is_erase(self) -> bool {
        matches!(self, RenderMode::Erase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(Tool::default(), Tool::Pencil);
    }

    #[test]
    fn test_render_mode_mapping() {
        let eraser = EraserBehavior::Clear;
        assert_eq!(Tool::Pencil.render_mode(eraser), RenderMode::Opaque);
        assert_eq!(
            Tool::Highlighter.render_mode(eraser),
            RenderMode::Translucent { alpha: 0.3 }
        );
        assert_eq!(Tool::Eraser.render_mode(eraser), RenderMode::Erase);
    }

    #[test]
    fn test_eraser_paint_background() {
        let white = StrokeColor::white();
        let mode = Tool::Eraser.render_mode(EraserBehavior::PaintBackground(white));
        assert_eq!(mode, RenderMode::Cover(white));
        // Only the eraser is affected by the behavior.
        assert_eq!(
            Tool::Pencil.render_mode(EraserBehavior::PaintBackground(white)),
            RenderMode::Opaque
        );
    }

    #[test]
    fn test_pencil_forces_full_opacity() {
        let color = StrokeColor::new(200, 10, 10, 40);
        let painted = RenderMode::Opaque.paint_color(color).unwrap();
        assert_eq!(StrokeColor::from(painted), StrokeColor::new(200, 10, 10, 255));
    }

    #[test]
    fn test_highlighter_overrides_alpha() {
        let color = StrokeColor::new(255, 230, 0, 255);
        let mode = Tool::Highlighter.render_mode(EraserBehavior::Clear);
        let painted = mode.paint_color(color).unwrap();
        assert_eq!(StrokeColor::from(painted), StrokeColor::new(255, 230, 0, 77));
    }

    #[test]
    fn test_erase_has_no_color() {
        let red = StrokeColor::rgb(255, 0, 0);
        assert!(RenderMode::Erase.paint_color(red).is_none());
        assert!(RenderMode::Erase.is_erase());
    }

    #[test]
    fn test_tool_serde_names() {
        let json = serde_json::to_string(&Tool::Highlighter).unwrap();
        assert_eq!(json, "\"highlighter\"");
        let tool: Tool = serde_json::from_str("\"eraser\"").unwrap();
        assert_eq!(tool, Tool::Eraser);
    }
}
