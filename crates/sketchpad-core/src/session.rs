//! Drawing session: turns pointer samples into committed strokes.

use crate::config::{ConfigResult, DEFAULT_STROKE_WIDTH, SessionConfig, is_valid_surface};
use crate::events::{EventBus, ListenerId, SessionEvent};
use crate::history::StrokeHistory;
use crate::input::{PointerEvent, PointerId, PointerTracker};
use crate::stroke::{self, LineEffect, Stroke, StrokeColor, StrokeId, StrokeStyle};
use crate::tools::{EraserBehavior, RenderMode, Tool};
use kurbo::{Point, Size};

/// Gesture state.
#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Idle,
    Drawing {
        /// Contact that owns the stroke; `None` when driven through the direct API.
        pointer: Option<PointerId>,
        /// Points sampled so far, append-only.
        points: Vec<Point>,
    },
}

/// Read-only view of the stroke being drawn, styled with the live configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePreview<'a> {
    pub points: &'a [Point],
    pub style: StrokeStyle,
}

/// Observable session fields, by value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub tool: Tool,
    pub color: StrokeColor,
    pub stroke_width: f64,
    pub style_effect: Option<LineEffect>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub stroke_count: usize,
    pub is_drawing: bool,
}

/// A drawing surface's state: live configuration, the in-progress stroke and history.
///
/// All calls are synchronous. Hosts that share a session across threads must
/// serialize access themselves (e.g. `Mutex<DrawSession>`).
#[derive(Debug)]
pub struct DrawSession {
    tool: Tool,
    color: StrokeColor,
    stroke_width: f64,
    effect: Option<LineEffect>,
    eraser: EraserBehavior,
    /// Bounds used to clamp incoming points; no clamping until measured.
    surface: Option<Size>,
    simplify_tolerance: Option<f64>,
    state: GestureState,
    pointers: PointerTracker,
    history: StrokeHistory,
    events: EventBus,
}

impl DrawSession {
    /// Create a session with an empty history and the pencil selected.
    pub fn new(color: impl Into<StrokeColor>, stroke_width: f64, eraser: EraserBehavior) -> Self {
        let stroke_width = if is_valid_width(stroke_width) {
            stroke_width
        } else {
            log::warn!(
                "Ignoring initial stroke width {stroke_width}, using {DEFAULT_STROKE_WIDTH}"
            );
            DEFAULT_STROKE_WIDTH
        };
        Self {
            tool: Tool::default(),
            color: color.into(),
            stroke_width,
            effect: None,
            eraser,
            surface: None,
            simplify_tolerance: None,
            state: GestureState::Idle,
            pointers: PointerTracker::new(),
            history: StrokeHistory::new(),
            events: EventBus::new(),
        }
    }

    /// Create a session from a validated configuration.
    pub fn from_config(config: &SessionConfig) -> ConfigResult<Self> {
        config.validate()?;
        let stroke_width = config.clamp_width(config.stroke_width)?;
        let mut session = Self::new(config.color, stroke_width, config.eraser);
        session.tool = config.tool;
        session.surface = config.surface_size;
        session.simplify_tolerance = config.simplify_tolerance;
        Ok(session)
    }

    /// Set the surface size used for clamping.
    pub fn with_surface_size(mut self, size: Size) -> Self {
        self.set_surface_size(size);
        self
    }

    // --- configuration ---

    pub fn set_color(&mut self, color: impl Into<StrokeColor>) {
        let color = color.into();
        if self.color != color {
            self.color = color;
            self.events.emit(SessionEvent::ColorChanged(color));
        }
    }

    /// Set the width for the next stroke. Non-finite or non-positive widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) -> bool {
        if !is_valid_width(width) {
            log::warn!("Ignoring stroke width {width}");
            return false;
        }
        if self.stroke_width != width {
            self.stroke_width = width;
            self.events.emit(SessionEvent::StrokeWidthChanged(width));
        }
        true
    }

    pub fn set_style_effect(&mut self, effect: Option<LineEffect>) {
        if self.effect != effect {
            self.effect = effect.clone();
            self.events.emit(SessionEvent::StyleEffectChanged(effect));
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
            self.events.emit(SessionEvent::ToolChanged(tool));
        }
    }

    /// Report a (re)measured surface. Points already sampled are kept as they are.
    pub fn set_surface_size(&mut self, size: Size) -> bool {
        if !is_valid_surface(size) {
            log::warn!("Ignoring surface size {size:?}");
            return false;
        }
        if self.surface != Some(size) {
            self.surface = Some(size);
            self.events.emit(SessionEvent::SurfaceResized(size));
        }
        true
    }

    // --- gesture ---

    /// Begin a stroke at `point`. A stroke already in progress is finished first.
    pub fn start_drawing(&mut self, point: Point) -> bool {
        self.begin_stroke(None, point)
    }

    /// Append a point to the in-progress stroke. Ignored when idle.
    pub fn continue_drawing(&mut self, point: Point) -> bool {
        let Some(point) = self.accept_point(point) else {
            return false;
        };
        match &mut self.state {
            GestureState::Drawing { points, .. } => {
                points.push(point);
                true
            }
            GestureState::Idle => false,
        }
    }

    /// Freeze the in-progress stroke with the current style and commit it.
    /// Returns the new stroke's id, or `None` when idle.
    pub fn finish_drawing(&mut self) -> Option<StrokeId> {
        let GestureState::Drawing { points, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let points = match self.simplify_tolerance {
            Some(tolerance) => stroke::simplify(&points, tolerance),
            None => points,
        };
        let stroke = Stroke::new(points, self.current_style())?;
        let id = stroke.id();
        let len = stroke.len();
        self.history.commit(stroke);

        log::debug!("Committed {} stroke {id} with {len} points", self.tool.name());
        self.events.emit(SessionEvent::StrokeCommitted { id, points: len });
        self.emit_history_changed();
        Some(id)
    }

    /// Feed a raw pointer event from the host. Returns true if the session consumed it.
    ///
    /// Only one contact draws at a time. A second contact while drawing finishes
    /// the stroke and is then ignored, as are all contacts until every one has lifted.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { id, position } => {
                if self.pointers.press(id) {
                    return self.begin_stroke(Some(id), position);
                }
                if self.is_drawing() {
                    log::debug!("Second contact {id:?} interrupted the stroke");
                    self.finish_drawing();
                }
                false
            }
            PointerEvent::Move { id, position } => {
                self.owns_stroke(id) && self.continue_drawing(position)
            }
            PointerEvent::Up { id, .. } | PointerEvent::Cancel { id } => {
                self.pointers.release(id);
                self.owns_stroke(id) && self.finish_drawing().is_some()
            }
        }
    }

    // --- history ---

    /// Move the newest stroke to the redo stack. Returns its id, or `None` if empty.
    pub fn undo(&mut self) -> Option<StrokeId> {
        let id = self.history.undo().map(Stroke::id)?;
        log::debug!("Undo stroke {id}");
        self.events.emit(SessionEvent::Undone { id });
        self.emit_history_changed();
        Some(id)
    }

    /// Restore the most recently undone stroke. Returns its id, or `None` if empty.
    pub fn redo(&mut self) -> Option<StrokeId> {
        let id = self.history.redo().map(Stroke::id)?;
        log::debug!("Redo stroke {id}");
        self.events.emit(SessionEvent::Redone { id });
        self.emit_history_changed();
        Some(id)
    }

    /// Drop all committed and undone strokes. Cannot be undone.
    pub fn clear(&mut self) {
        let removed = self.history.clear();
        log::info!("Cleared {removed} strokes");
        self.events.emit(SessionEvent::Cleared { removed });
        self.emit_history_changed();
    }

    // --- observers ---

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SessionEvent) + Send + 'static,
    ) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // --- readers ---

    pub fn current_color(&self) -> StrokeColor {
        self.color
    }

    pub fn current_stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn current_tool(&self) -> Tool {
        self.tool
    }

    pub fn current_style_effect(&self) -> Option<&LineEffect> {
        self.effect.as_ref()
    }

    pub fn eraser_behavior(&self) -> EraserBehavior {
        self.eraser
    }

    pub fn surface_size(&self) -> Option<Size> {
        self.surface
    }

    /// Style a stroke finished right now would get.
    pub fn current_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.stroke_width,
            effect: self.effect.clone(),
            tool: self.tool,
        }
    }

    /// Render mode for a tool under this session's eraser behavior.
    pub fn render_mode(&self, tool: Tool) -> RenderMode {
        tool.render_mode(self.eraser)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Committed strokes, oldest first.
    pub fn committed_strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// The stroke being drawn, if any.
    pub fn in_progress_stroke(&self) -> Option<StrokePreview<'_>> {
        match &self.state {
            GestureState::Drawing { points, .. } => Some(StrokePreview {
                points,
                style: self.current_style(),
            }),
            GestureState::Idle => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tool: self.tool,
            color: self.color,
            stroke_width: self.stroke_width,
            style_effect: self.effect.clone(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            stroke_count: self.history.len(),
            is_drawing: self.is_drawing(),
        }
    }

    // --- internals ---

    fn begin_stroke(&mut self, pointer: Option<PointerId>, point: Point) -> bool {
        let Some(point) = self.accept_point(point) else {
            return false;
        };
        if self.is_drawing() {
            self.finish_drawing();
        }
        log::debug!(
            "{} stroke started at ({:.1}, {:.1})",
            self.tool.name(),
            point.x,
            point.y
        );
        self.state = GestureState::Drawing {
            pointer,
            points: vec![point],
        };
        self.events.emit(SessionEvent::StrokeStarted { tool: self.tool });
        true
    }

    fn owns_stroke(&self, id: PointerId) -> bool {
        matches!(self.state, GestureState::Drawing { pointer: Some(owner), .. } if owner == id)
    }

    /// Clamp to the surface; non-finite samples are dropped.
    fn accept_point(&self, point: Point) -> Option<Point> {
        if !point.is_finite() {
            log::warn!("Dropping non-finite pointer sample {point:?}");
            return None;
        }
        Some(match self.surface {
            Some(size) => Point::new(
                point.x.clamp(0.0, size.width),
                point.y.clamp(0.0, size.height),
            ),
            None => point,
        })
    }

    fn emit_history_changed(&mut self) {
        self.events.emit(SessionEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}

fn is_valid_width(width: f64) -> bool {
    width.is_finite() && width > 0.0
}
