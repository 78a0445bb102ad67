//! Pen color and stroke style.
//!
//! The style is never cached by the engine: [`StyleSource::current_style`] is
//! called for every painted segment, so changing the color or size control in
//! the middle of a stroke takes effect on the next segment.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use crate::config::SketchConfig;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`, case-insensitive, surrounding whitespace ignored.
    #[must_use]
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = hex_byte(&hex[0..1].repeat(2))?;
                let g = hex_byte(&hex[1..2].repeat(2))?;
                let b = hex_byte(&hex[2..3].repeat(2))?;
                Some(Self::new(r, g, b))
            }
            6 => {
                let r = hex_byte(&hex[0..2])?;
                let g = hex_byte(&hex[2..4])?;
                let b = hex_byte(&hex[4..6])?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn hex_byte(digits: &str) -> Option<u8> {
    match u8::from_str_radix(digits, 16) {
        Ok(byte) => Some(byte),
        Err(_) => None,
    }
}

/// Line cap. Only round caps are drawn so consecutive segments join without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
}

impl LineCap {
    /// Canvas 2D keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
        }
    }
}

/// Line join. See [`LineCap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Round,
}

impl LineJoin {
    /// Canvas 2D keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
        }
    }
}

/// Style applied to a single painted segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Line width in logical pixels. Always positive.
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: Rgb, width: f64) -> Self {
        Self { color, width, cap: LineCap::Round, join: LineJoin::Round }
    }

    /// Build a style from the raw string values of the color and size controls.
    ///
    /// An unparseable color falls back to the configured default color. A size
    /// that is not a positive finite number falls back to the configured default
    /// size. The result is clamped to the configured brush range.
    #[must_use]
    pub fn from_control_values(color_raw: &str, size_raw: &str, config: &SketchConfig) -> Self {
        let color = Rgb::parse_hex(color_raw).unwrap_or_else(|| config.default_color_rgb());
        let size = match size_raw.trim().parse::<f64>() {
            Ok(s) if s.is_finite() && s > 0.0 => s,
            _ => config.default_brush_size,
        };
        Self::new(color, config.clamp_brush(size))
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        let config = SketchConfig::default();
        Self::new(config.default_color_rgb(), config.default_brush_size)
    }
}

/// Something the engine can ask for the current pen style at paint time.
pub trait StyleSource {
    fn current_style(&self) -> StrokeStyle;
}

impl StyleSource for StrokeStyle {
    fn current_style(&self) -> StrokeStyle {
        *self
    }
}
