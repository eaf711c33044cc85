//! Pointer events and the gesture state they drive.

use crate::hit::ResizeDirection;
use crate::shapes::{CellRef, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event in screen coordinates (relative to the surface's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
}

/// The object a gesture acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Shape(ShapeId),
    Table(ShapeId),
}

impl Target {
    pub fn id(self) -> ShapeId {
        match self {
            Target::Shape(id) | Target::Table(id) => id,
        }
    }
}

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an object; its top-left follows `pointer - grab`.
    Dragging {
        target: Target,
        /// Scene offset from the object's top-left to the pointer at pointer-down.
        grab: Vec2,
    },
    /// Moving one or two edges of an object's box.
    Resizing {
        target: Target,
        direction: ResizeDirection,
        /// Scene offset from the box's top-left to the pointer at pointer-down.
        grab: Vec2,
        /// The box when the gesture started.
        start: Rect,
    },
    /// Panning the view; `anchor` stays under the pointer.
    Panning { anchor: Point },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Object the gesture acts on, if any.
    pub fn target(&self) -> Option<Target> {
        match self {
            Gesture::Dragging { target, .. } | Gesture::Resizing { target, .. } => Some(*target),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }
}

/// An open text edit on one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub table_id: ShapeId,
    pub cell: CellRef,
    /// The cell's text when the session opened.
    pub initial_text: String,
}

/// New box for a resize tick.
///
/// Edges named by `direction` move by `delta`; the opposite edges stay where
/// they were in `start`. Width and height are clamped to `min`, and the clamp
/// never moves a fixed edge.
pub fn resized_bounds(start: Rect, direction: ResizeDirection, delta: Vec2, min: (f64, f64)) -> Rect {
    let (min_w, min_h) = min;
    let mut x0 = start.x0;
    let mut x1 = start.x1;
    let mut y0 = start.y0;
    let mut y1 = start.y1;

    if direction.moves_left() {
        x0 = (start.x0 + delta.x).min(x1 - min_w);
    } else if direction.moves_right() {
        x1 = (start.x1 + delta.x).max(x0 + min_w);
    }
    if direction.moves_top() {
        y0 = (start.y0 + delta.y).min(y1 - min_h);
    } else if direction.moves_bottom() {
        y1 = (start.y1 + delta.y).max(y0 + min_h);
    }

    Rect::new(x0, y0, x1, y1)
}
