//! Session configuration and the stroke-width boundary.

use crate::stroke::StrokeColor;
use crate::tools::{EraserBehavior, Tool};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default stroke width for new sessions.
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid stroke width: {0}")]
    InvalidWidth(f64),
    #[error("Invalid stroke width range: {min}..={max}")]
    InvalidWidthRange { min: f64, max: f64 },
    #[error("Invalid simplify tolerance: {0}")]
    InvalidTolerance(f64),
    #[error("Invalid surface size: {0:?}")]
    InvalidSurface(Size),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Accepted stroke widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeWidthRange {
    pub min: f64,
    pub max: f64,
}

impl Default for StrokeWidthRange {
    fn default() -> Self {
        Self { min: 1.0, max: 50.0 }
    }
}

impl StrokeWidthRange {
    /// Check the range itself is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let ok = self.min.is_finite()
            && self.max.is_finite()
            && self.min > 0.0
            && self.min <= self.max;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidWidthRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Reject garbage widths and clamp the rest into range.
    pub fn clamp(&self, width: f64) -> ConfigResult<f64> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidWidth(width));
        }
        Ok(width.clamp(self.min, self.max))
    }
}

/// Everything needed to create a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial stroke color.
    pub color: StrokeColor,
    /// Initial stroke width, passed through [`StrokeWidthRange::clamp`].
    pub stroke_width: f64,
    /// Initially selected tool.
    pub tool: Tool,
    pub eraser: EraserBehavior,
    pub width_range: StrokeWidthRange,
    /// Surface size used for clamping, if already measured.
    pub surface_size: Option<Size>,
    /// Simplify finished strokes with this tolerance (off when `None`).
    pub simplify_tolerance: Option<f64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            color: StrokeColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            tool: Tool::default(),
            eraser: EraserBehavior::default(),
            width_range: StrokeWidthRange::default(),
            surface_size: None,
            simplify_tolerance: None,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.width_range.validate()?;
        self.width_range.clamp(self.stroke_width)?;
        if let Some(tolerance) = self.simplify_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        if let Some(size) = self.surface_size {
            if !is_valid_surface(size) {
                return Err(ConfigError::InvalidSurface(size));
            }
        }
        Ok(())
    }

    /// Clamp a width coming from UI (slider, text field) before it reaches a session.
    pub fn clamp_width(&self, width: f64) -> ConfigResult<f64> {
        self.width_range.clamp(width)
    }
}

/// Finite, non-negative width and height.
pub fn is_valid_surface(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0
}
