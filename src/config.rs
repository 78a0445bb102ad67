//! Host-supplied configuration.
//!
//! The JS host may pass a JSON object when attaching. Every field is optional
//! and falls back to the values in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_BRUSH_SIZE, DEFAULT_PEN_COLOR, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH,
    MAX_BRUSH_SIZE, MIN_BRUSH_SIZE,
};
use crate::style::Rgb;

/// Error returned by [`SketchConfig::from_json`] and [`SketchConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not valid JSON for this shape.
    #[error("invalid sketch config: {0}")]
    Json(#[from] serde_json::Error),
    /// A color field is not `#rgb` or `#rrggbb`.
    #[error("invalid color for `{field}`: {value:?}")]
    InvalidColor { field: &'static str, value: String },
    /// Brush bounds are not positive or are inverted.
    #[error("invalid brush range: min {min}, max {max}")]
    InvalidBrushRange { min: f64, max: f64 },
    /// A surface dimension is zero.
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}

/// Tunables for a sketch instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Logical width of headless surfaces. Browser surfaces use the element's own size.
    pub width: u32,
    /// Logical height of headless surfaces.
    pub height: u32,
    /// Fill used on mount and on clear.
    pub background: String,
    /// Pen color when the color control value cannot be parsed.
    pub default_color: String,
    /// Brush size when the size control value cannot be parsed.
    pub default_brush_size: f64,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            background: DEFAULT_BACKGROUND.to_owned(),
            default_color: DEFAULT_PEN_COLOR.to_owned(),
            default_brush_size: DEFAULT_BRUSH_SIZE,
            min_brush_size: MIN_BRUSH_SIZE,
            max_brush_size: MAX_BRUSH_SIZE,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or any value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that colors parse and the brush range is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySurface { width: self.width, height: self.height });
        }
        for (field, value) in [("background", &self.background), ("default_color", &self.default_color)] {
            if Rgb::parse_hex(value).is_none() {
                return Err(ConfigError::InvalidColor { field, value: value.clone() });
            }
        }
        let (min, max) = (self.min_brush_size, self.max_brush_size);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidBrushRange { min, max });
        }
        Ok(())
    }

    /// Background as RGB. Falls back to white for an unvalidated bad value.
    #[must_use]
    pub fn background_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.background).unwrap_or(Rgb::WHITE)
    }

    /// Default pen color as RGB. Falls back to black for an unvalidated bad value.
    #[must_use]
    pub fn default_color_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.default_color).unwrap_or(Rgb::BLACK)
    }

    /// Clamp a brush size into the configured range.
    #[must_use]
    pub fn clamp_brush(&self, size: f64) -> f64 {
        // `f64::clamp` panics on NaN bounds; max/min just skip them.
        size.max(self.min_brush_size).min(self.max_brush_size.max(self.min_brush_size))
    }
}
