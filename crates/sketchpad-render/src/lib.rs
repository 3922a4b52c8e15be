//! Sketchpad Render Library
//!
//! Renderer abstraction and implementations for Sketchpad.
//! The default implementation uses Vello for GPU-accelerated rendering;
//! [`DisplayListRenderer`] records the same frame as plain paint operations.

mod display_list;
mod paint;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use display_list::{DisplayListRenderer, PaintOp};
pub use paint::{Paint, StrokeGeometry, line_style};
pub use renderer::{
    RenderContext, RenderResult, Renderer, RendererError, StrokeRenderer, paint_session,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
