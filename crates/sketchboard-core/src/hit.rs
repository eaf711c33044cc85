//! Hit-testing and edge classification in scene coordinates.
//!
//! Everything here is a pure function of a point and the objects under test,
//! so the interaction state machine can decide between drag and resize once
//! per pointer-down without touching any renderer state.

use crate::shapes::{CellRef, Shape, Table};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default distance within which a point counts as "on" an edge.
pub const EDGE_THRESHOLD: f64 = 10.0;

/// Which edge or corner of a bounding box a point is near.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeDirection {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    /// Whether this direction moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// Cursor shown while hovering or dragging this edge.
    pub fn cursor(self) -> CursorHint {
        match self {
            Self::Left | Self::Right => CursorHint::EwResize,
            Self::Top | Self::Bottom => CursorHint::NsResize,
            Self::TopLeft | Self::BottomRight => CursorHint::NwseResize,
            Self::TopRight | Self::BottomLeft => CursorHint::NeswResize,
        }
    }
}

/// Pointer cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Move => "move",
            CursorHint::EwResize => "ew-resize",
            CursorHint::NsResize => "ns-resize",
            CursorHint::NwseResize => "nwse-resize",
            CursorHint::NeswResize => "nesw-resize",
        }
    }
}

/// Inclusive containment, so points exactly on the outline hit.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Classify a point against the edges of a box.
///
/// A point is near an edge when it lies within `threshold` of the edge's line
/// and within the box's span along the other axis.
/// Corners win over single edges.
pub fn rect_edge_proximity(point: Point, rect: Rect, threshold: f64) -> Option<ResizeDirection> {
    let in_x_span = point.x >= rect.x0 && point.x <= rect.x1;
    let in_y_span = point.y >= rect.y0 && point.y <= rect.y1;

    let near_left = in_y_span && (point.x - rect.x0).abs() <= threshold;
    let near_right = in_y_span && (point.x - rect.x1).abs() <= threshold;
    let near_top = in_x_span && (point.y - rect.y0).abs() <= threshold;
    let near_bottom = in_x_span && (point.y - rect.y1).abs() <= threshold;

    // Left/top are checked first, so a box thinner than 2 * threshold
    // resolves toward its top-left.
    match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => Some(ResizeDirection::TopLeft),
        (true, _, _, true) => Some(ResizeDirection::BottomLeft),
        (_, true, true, _) => Some(ResizeDirection::TopRight),
        (_, true, _, true) => Some(ResizeDirection::BottomRight),
        (true, _, _, _) => Some(ResizeDirection::Left),
        (_, true, _, _) => Some(ResizeDirection::Right),
        (_, _, true, _) => Some(ResizeDirection::Top),
        (_, _, _, true) => Some(ResizeDirection::Bottom),
        _ => None,
    }
}

/// Topmost shape whose bounding box contains the point.
///
/// Shapes are stored in creation order, so the last match is the most
/// recently created one.
pub fn shape_at(point: Point, shapes: &[Shape]) -> Option<&Shape> {
    shapes
        .iter()
        .rev()
        .find(|shape| contains_inclusive(shape.bounds(), point))
}

/// Edge classification against a shape's bounding box.
pub fn edge_proximity(point: Point, shape: &Shape, threshold: f64) -> Option<ResizeDirection> {
    rect_edge_proximity(point, shape.bounds(), threshold)
}

/// Topmost table whose outer box contains the point.
pub fn table_at(point: Point, tables: &[Table]) -> Option<&Table> {
    tables
        .iter()
        .rev()
        .find(|table| contains_inclusive(table.bounds(), point))
}

/// The cell of `table` containing the point, using half-open cell intervals.
pub fn table_cell_at(point: Point, table: &Table) -> Option<CellRef> {
    if table.cell_width <= 0.0 || table.cell_height <= 0.0 {
        return None;
    }
    let dx = point.x - table.origin.x;
    let dy = point.y - table.origin.y;
    if dx < 0.0 || dy < 0.0 {
        return None;
    }
    let col = (dx / table.cell_width).floor() as usize;
    let row = (dy / table.cell_height).floor() as usize;
    (row < table.rows() && col < table.cols()).then(|| CellRef::new(row, col))
}

/// Edge classification against a table's outer box.
pub fn table_edge_proximity(point: Point, table: &Table, threshold: f64) -> Option<ResizeDirection> {
    rect_edge_proximity(point, table.bounds(), threshold)
}
