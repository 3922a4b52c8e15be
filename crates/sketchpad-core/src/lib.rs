//! Sketchpad Core Library
//!
//! Platform-agnostic stroke model, undo/redo history and gesture state machine
//! for an embeddable freehand drawing surface.

pub mod config;
pub mod events;
pub mod history;
pub mod input;
pub mod session;
pub mod stroke;
pub mod tools;

pub use config::{ConfigError, ConfigResult, SessionConfig, StrokeWidthRange};
pub use events::{EventBus, ListenerId, SessionEvent};
pub use history::StrokeHistory;
pub use input::{PointerEvent, PointerId, PointerTracker};
pub use session::{DrawSession, SessionSnapshot, StrokePreview};
pub use stroke::{LineEffect, Stroke, StrokeColor, StrokeId, StrokeStyle};
pub use tools::{EraserBehavior, HIGHLIGHTER_ALPHA, RenderMode, Tool};

pub use kurbo::{Point, Size};
