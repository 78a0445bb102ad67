//! The paint seam between the stroke engine and a concrete raster.
//!
//! [`crate::raster::RasterSurface`] paints into memory and is what tests and
//! headless callers use. [`crate::dom::CanvasSurface`] paints into a browser
//! `<canvas>` through its 2D context.

use crate::geom::{Point, SurfaceLayout};
use crate::style::{Rgb, StrokeStyle};

/// Error produced while exporting surface contents.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// PNG encoding of an in-memory raster failed.
    #[error("failed to encode surface as PNG: {0}")]
    Encode(#[from] image::ImageError),
    /// A browser canvas call failed.
    #[error("canvas call failed: {0}")]
    Js(String),
}

/// A fixed-size raster the engine can paint on and export.
pub trait Surface {
    /// Current on-screen placement and logical size.
    fn layout(&self) -> SurfaceLayout;

    /// Cover every pixel with an opaque color.
    fn fill_background(&mut self, color: Rgb);

    /// Paint one straight segment with round caps and joins.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Encode the full current contents as a `data:image/png;base64,` URL.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the raster cannot be encoded.
    fn to_data_url(&self) -> Result<String, SurfaceError>;
}
