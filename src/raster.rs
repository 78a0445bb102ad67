//! In-memory RGBA surface.
//!
//! Segments are rasterized as capsules: every pixel whose center lies within
//! `width / 2` of the segment is painted, which yields round caps and joins for
//! free. Edge pixels get linear coverage over one pixel so strokes are not
//! jagged; fully covered pixels receive the exact stroke color.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::config::SketchConfig;
use crate::geom::{ClientRect, Point, SurfaceLayout};
use crate::snapshot::png_data_url;
use crate::style::{Rgb, StrokeStyle};
use crate::surface::{Surface, SurfaceError};

/// Headless surface backed by an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    rect: ClientRect,
}

impl RasterSurface {
    /// A transparent surface displayed at its own size at the client origin.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let layout = SurfaceLayout::unscaled(width, height);
        Self { image: RgbaImage::new(width, height), rect: layout.rect }
    }

    #[must_use]
    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Pretend the surface is displayed at `rect` on screen.
    pub fn set_display_rect(&mut self, rect: ClientRect) {
        self.rect = rect;
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color of one pixel, ignoring alpha. `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.image.get_pixel_checked(x, y).map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode the raster as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Encode`] if the PNG encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut bytes = Vec::new();
        self.image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Pixel index range `[lo, hi)` covering `lo_f..=hi_f`, clipped to `0..limit`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn span(lo_f: f64, hi_f: f64, limit: u32) -> (u32, u32) {
        let limit_f = f64::from(limit);
        let lo = lo_f.floor().clamp(0.0, limit_f) as u32;
        let hi = (hi_f.ceil() + 1.0).clamp(0.0, limit_f) as u32;
        (lo, hi)
    }
}

impl Surface for RasterSurface {
    fn layout(&self) -> SurfaceLayout {
        SurfaceLayout {
            rect: self.rect,
            logical_width: f64::from(self.image.width()),
            logical_height: f64::from(self.image.height()),
        }
    }

    fn fill_background(&mut self, color: Rgb) {
        let fill = Rgba([color.r, color.g, color.b, 255]);
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let radius = style.width / 2.0;
        let (x0, x1) = Self::span(from.x.min(to.x) - radius, from.x.max(to.x) + radius, self.image.width());
        let (y0, y1) = Self::span(from.y.min(to.y) - radius, from.y.max(to.y) + radius, self.image.height());
        let ink = [f64::from(style.color.r), f64::from(style.color.g), f64::from(style.color.b)];

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let coverage = (radius + 0.5 - center.distance_to_segment(from, to)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(x, y);
                for (channel, value) in pixel.0.iter_mut().take(3).zip(ink) {
                    let blended = value * coverage + f64::from(*channel) * (1.0 - coverage);
                    *channel = blended.round().clamp(0.0, 255.0) as u8;
                }
                pixel.0[3] = 255;
            }
        }
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        Ok(png_data_url(&self.encode_png()?))
    }
}
