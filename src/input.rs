//! Input model: raw pointer events, the normalizer, and the stroke state machine.
//!
//! Mouse and touch events arrive in client coordinates. [`normalize`] maps them
//! into the surface's logical pixel grid so the renderer never needs to know
//! how the element is scaled on screen. [`InputState`] is the gesture being
//! tracked between press and release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, SurfaceLayout};

/// A press/move event as delivered by the browser, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPointer {
    /// Mouse event carrying `clientX` / `clientY`.
    Mouse {
        /// Client-space position of the cursor.
        client: Point,
    },
    /// Touch event; only the first touch point is used.
    Touch {
        /// Client-space position of the first touch, if the list was non-empty.
        first: Option<Point>,
    },
}

impl RawPointer {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse { client: Point::new(x, y) }
    }

    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch { first: Some(Point::new(x, y)) }
    }

    /// Client-space position, if the event carries one.
    #[must_use]
    pub fn client_point(&self) -> Option<Point> {
        match *self {
            Self::Mouse { client } => Some(client),
            Self::Touch { first } => first,
        }
    }
}

/// Map a raw event into logical surface coordinates.
///
/// Each axis is scaled independently by `logical / displayed`, so a surface
/// shown at half size maps client offset `(x, y)` to `(2x, 2y)`. Returns
/// `None` for a touch event with no touch points, or when the layout has no
/// measurable on-screen size.
#[must_use]
pub fn normalize(raw: &RawPointer, layout: &SurfaceLayout) -> Option<Point> {
    let client = raw.client_point()?;
    if !layout.rect.is_measurable() {
        return None;
    }
    let (sx, sy) = layout.scale();
    Some(Point::new((client.x - layout.rect.left) * sx, (client.y - layout.rect.top) * sy))
}

/// Stroke state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No stroke in progress; moves are ignored.
    #[default]
    Idle,
    /// A press happened and no release has been seen yet.
    Drawing {
        /// Logical position of the previous press or move.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The previous point of the active stroke. Only meaningful while drawing.
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        match *self {
            Self::Idle => None,
            Self::Drawing { last } => Some(last),
        }
    }
}
