#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in either client (CSS pixel) or logical surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from this point to the segment `a`–`b`.
    #[must_use]
    pub fn distance_to_segment(self, a: Point, b: Point) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f64::EPSILON {
            return (self.x - a.x).hypot(self.y - a.y);
        }
        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        let px = a.x + t * dx;
        let py = a.y + t * dy;
        (self.x - px).hypot(self.y - py)
    }
}

/// The on-screen bounding rectangle of the surface element, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the rectangle can be used as a divisor for scaling.
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Where the surface sits on screen and how large its backing raster is.
///
/// `rect` is the displayed box; `logical_width` / `logical_height` are the
/// raster dimensions. The two differ whenever CSS scales the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub rect: ClientRect,
    pub logical_width: f64,
    pub logical_height: f64,
}

impl SurfaceLayout {
    /// A layout displayed at exactly its logical size with its origin at `(0, 0)`.
    #[must_use]
    pub fn unscaled(width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        Self { rect: ClientRect::new(0.0, 0.0, w, h), logical_width: w, logical_height: h }
    }

    /// Horizontal and vertical logical-per-client-pixel ratios.
    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.logical_width / self.rect.width, self.logical_height / self.rect.height)
    }
}
