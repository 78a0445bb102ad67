//! Shared constants for the sketchpad crate.

// ── Surface ─────────────────────────────────────────────────────

/// Default logical surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: u32 = 900;

/// Default logical surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 560;

/// Opaque background painted on mount and on every clear.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

// ── Pen ─────────────────────────────────────────────────────────

/// Pen color used when the color control is missing or unparseable.
pub const DEFAULT_PEN_COLOR: &str = "#000000";

/// Brush size used when the size control is missing or unparseable.
pub const DEFAULT_BRUSH_SIZE: f64 = 3.0;

/// Smallest brush size the range control offers.
pub const MIN_BRUSH_SIZE: f64 = 1.0;

/// Largest brush size the range control offers.
pub const MAX_BRUSH_SIZE: f64 = 20.0;

// ── Snapshot ────────────────────────────────────────────────────

/// Prefix of every non-empty snapshot payload.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Prefix the generation backend requires before it will decode a payload.
pub const IMAGE_DATA_URL_PREFIX: &str = "data:image/";

/// Multipart field name carrying the snapshot.
pub const CANVAS_DATA_FIELD: &str = "canvas_data";
