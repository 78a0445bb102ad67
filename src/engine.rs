use crate::config::SketchConfig;
use crate::dom::{CanvasSurface, ControlStyle};
use crate::input::{InputState, RawPointer, normalize};
use crate::snapshot::SketchSnapshot;
use crate::style::{Rgb, StyleSource};
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Outcome of an input handler, for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The event changed nothing.
    None,
    /// A press moved the engine into the drawing state.
    StrokeStarted,
    /// One segment was painted.
    SegmentPainted,
    /// A release ended the active stroke.
    StrokeEnded,
    /// The surface was wiped.
    Cleared,
}

impl Action {
    /// Whether the host should call `preventDefault` on the originating event.
    ///
    /// Only painted moves do, so touch drawing does not scroll the page.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::SegmentPainted)
    }
}

/// Core engine state: all logic that doesn't depend on the browser.
///
/// Generic over the [`Surface`] so it can be tested against a
/// [`crate::raster::RasterSurface`] without WASM.
pub struct EngineCore<S> {
    surface: S,
    pub input: InputState,
    dirty: bool,
    epoch: u64,
    background: Rgb,
}

impl<S: Surface> EngineCore<S> {
    /// Take ownership of a surface and paint it with the background color.
    pub fn new(mut surface: S, config: &SketchConfig) -> Self {
        let background = config.background_rgb();
        surface.fill_background(background);
        Self { surface, input: InputState::Idle, dirty: false, epoch: 0, background }
    }

    // --- Input events ---

    /// Mouse-down or touch-start on the surface.
    ///
    /// Marks the sketch dirty even if no move follows.
    pub fn on_press(&mut self, raw: &RawPointer) -> Action {
        let Some(point) = normalize(raw, &self.surface.layout()) else {
            log::debug!("press ignored: no usable pointer position");
            return Action::None;
        };
        self.input = InputState::Drawing { last: point };
        self.dirty = true;
        log::debug!("stroke started at ({:.1}, {:.1})", point.x, point.y);
        Action::StrokeStarted
    }

    /// Mouse-move or touch-move. Paints one segment while drawing, otherwise does nothing.
    pub fn on_move(&mut self, raw: &RawPointer, style: &dyn StyleSource) -> Action {
        let InputState::Drawing { last } = self.input else {
            return Action::None;
        };
        let Some(point) = normalize(raw, &self.surface.layout()) else {
            return Action::None;
        };
        let style = style.current_style();
        self.surface.stroke_segment(last, point, &style);
        self.input = InputState::Drawing { last: point };
        // Ink after a mid-stroke clear still counts.
        self.dirty = true;
        Action::SegmentPainted
    }

    /// Window mouse-up or touch-end. Ends the stroke without repainting.
    pub fn on_release(&mut self) -> Action {
        if !self.input.is_drawing() {
            return Action::None;
        }
        self.input = InputState::Idle;
        log::debug!("stroke ended");
        Action::StrokeEnded
    }

    // --- Commands ---

    /// Paint the background over everything and forget that anything was drawn.
    ///
    /// Snapshots taken before this call become stale.
    pub fn clear(&mut self) -> Action {
        self.surface.fill_background(self.background);
        self.dirty = false;
        self.epoch += 1;
        log::debug!("surface cleared (epoch {})", self.epoch);
        Action::Cleared
    }

    /// Encode the surface as it is right now, or the empty value if nothing was drawn.
    ///
    /// An encoding failure is logged and reported as "no sketch".
    #[must_use]
    pub fn snapshot(&self) -> SketchSnapshot {
        if !self.dirty {
            return SketchSnapshot::empty();
        }
        match self.surface.to_data_url() {
            Ok(url) => SketchSnapshot::from_data_url(url, self.epoch),
            Err(err) => {
                log::warn!("sketch export failed: {err}");
                SketchSnapshot::empty()
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    /// Number of clears since creation.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a clear has happened since `snapshot` was taken.
    #[must_use]
    pub fn is_stale(&self, snapshot: &SketchSnapshot) -> bool {
        !snapshot.is_empty() && snapshot.epoch() != self.epoch
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// The browser engine. Wraps `EngineCore` over a `<canvas>` and reads the pen
/// style from the page's controls.
pub struct Engine {
    pub core: EngineCore<CanvasSurface>,
    style: ControlStyle,
}

impl Engine {
    #[must_use]
    pub fn new(surface: CanvasSurface, style: ControlStyle, config: &SketchConfig) -> Self {
        Self { core: EngineCore::new(surface, config), style }
    }

    pub fn on_press(&mut self, raw: &RawPointer) -> Action {
        self.core.on_press(raw)
    }

    pub fn on_move(&mut self, raw: &RawPointer) -> Action {
        self.core.on_move(raw, &self.style)
    }

    pub fn on_release(&mut self) -> Action {
        self.core.on_release()
    }

    pub fn clear(&mut self) -> Action {
        self.core.clear()
    }

    #[must_use]
    pub fn snapshot(&self) -> SketchSnapshot {
        self.core.snapshot()
    }
}
