//! Grid tables of text cells.

use super::ShapeId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Minimum cell width a resize may produce.
pub const MIN_CELL_WIDTH: f64 = 50.0;
/// Minimum cell height a resize may produce.
pub const MIN_CELL_HEIGHT: f64 = 20.0;

/// A row/column address inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A grid of text cells sharing one cell width and one cell height.
///
/// The data grid always has exactly `rows` rows of `cols` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: ShapeId,
    /// Top-left corner of the grid.
    pub origin: Point,
    rows: usize,
    cols: usize,
    pub cell_width: f64,
    /// Shared by every row; grows when a committed cell needs more room.
    pub cell_height: f64,
    data: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with every cell empty. Counts below one are raised to one.
    pub(crate) fn new(
        id: ShapeId,
        origin: Point,
        rows: usize,
        cols: usize,
        cell_width: f64,
        cell_height: f64,
    ) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            id,
            origin,
            rows,
            cols,
            cell_width,
            cell_height,
            data: vec![vec![String::new(); cols]; rows],
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell text.
    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    pub fn cell(&self, cell: CellRef) -> Option<&str> {
        self.data
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .map(String::as_str)
    }

    /// Replace a cell's text. Returns false when the address is out of range.
    pub(crate) fn set_cell(&mut self, cell: CellRef, text: String) -> bool {
        match self.data.get_mut(cell.row).and_then(|row| row.get_mut(cell.col)) {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }

    /// Outer bounding box of the whole grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.cols as f64 * self.cell_width,
            self.origin.y + self.rows as f64 * self.cell_height,
        )
    }

    /// Bounding box of a single cell.
    pub fn cell_bounds(&self, cell: CellRef) -> Rect {
        let x = self.origin.x + cell.col as f64 * self.cell_width;
        let y = self.origin.y + cell.row as f64 * self.cell_height;
        Rect::new(x, y, x + self.cell_width, y + self.cell_height)
    }

    /// Iterate every cell address in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellRef::new(row, col)))
    }

    /// Fit the grid to a new outer box, keeping the grid dimensions.
    ///
    /// Cell sizes are clamped to their minimums; `anchor_right`/`anchor_bottom`
    /// keep that far edge fixed when the clamp kicks in.
    pub(crate) fn fit_outer(&mut self, outer: Rect, anchor_right: bool, anchor_bottom: bool) {
        let cell_width = (outer.width() / self.cols as f64).max(MIN_CELL_WIDTH);
        let cell_height = (outer.height() / self.rows as f64).max(MIN_CELL_HEIGHT);
        let x = if anchor_right {
            outer.x1 - cell_width * self.cols as f64
        } else {
            outer.x0
        };
        let y = if anchor_bottom {
            outer.y1 - cell_height * self.rows as f64
        } else {
            outer.y0
        };
        self.origin = Point::new(x, y);
        self.cell_width = cell_width;
        self.cell_height = cell_height;
    }
}
