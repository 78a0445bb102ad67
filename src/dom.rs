//! Browser bindings: the `<canvas>` surface, the live style controls, and
//! DOM event conversion.
//!
//! Nothing here holds application state. The engine owns the surface and the
//! host owns the listeners.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

use crate::config::SketchConfig;
use crate::geom::{ClientRect, Point, SurfaceLayout};
use crate::input::RawPointer;
use crate::style::{Rgb, StrokeStyle, StyleSource};
use crate::surface::{Surface, SurfaceError};

/// A `<canvas>` element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`. Returns `None` if the browser refuses.
    #[must_use]
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = match canvas.get_context("2d") {
            Ok(Some(context)) => context,
            Ok(None) => {
                log::warn!("canvas has no 2d context");
                return None;
            }
            Err(err) => {
                log::warn!("canvas getContext failed: {err:?}");
                return None;
            }
        };
        match context.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(Self { canvas, ctx }),
            Err(other) => {
                log::warn!("canvas context is not 2d: {other:?}");
                None
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn layout(&self) -> SurfaceLayout {
        let rect = self.canvas.get_bounding_client_rect();
        SurfaceLayout {
            rect: ClientRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
            logical_width: f64::from(self.canvas.width()),
            logical_height: f64::from(self.canvas.height()),
        }
    }

    fn fill_background(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx
            .fill_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&style.color.to_hex());
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_cap(style.cap.as_str());
        self.ctx.set_line_join(style.join.as_str());
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url()
            .map_err(|err| SurfaceError::Js(format!("{err:?}")))
    }
}

/// Reads the pen color and brush size from their `<input>` elements on every call.
pub struct ControlStyle {
    color: HtmlInputElement,
    size: HtmlInputElement,
    config: SketchConfig,
}

impl ControlStyle {
    #[must_use]
    pub fn new(color: HtmlInputElement, size: HtmlInputElement, config: SketchConfig) -> Self {
        Self { color, size, config }
    }
}

impl StyleSource for ControlStyle {
    fn current_style(&self) -> StrokeStyle {
        StrokeStyle::from_control_values(&self.color.value(), &self.size.value(), &self.config)
    }
}

/// Convert a DOM mouse or touch event into a [`RawPointer`].
///
/// Returns `None` for any other event type.
#[must_use]
pub fn raw_pointer(event: &Event) -> Option<RawPointer> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(RawPointer::mouse(f64::from(mouse.client_x()), f64::from(mouse.client_y())));
    }
    let touch = event.dyn_ref::<TouchEvent>()?;
    let first = touch
        .touches()
        .get(0)
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())));
    Some(RawPointer::Touch { first })
}
