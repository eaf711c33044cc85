//! The shape and table store.

use crate::reflow::{self, TextMeasure};
use crate::shapes::{CellRef, Shape, ShapeId, ShapeKind, StyleDelta, Table, TextStyle};
use kurbo::{Point, Rect, Size};

/// Every placed shape and table, in creation order.
///
/// Tables are painted and hit-tested above shapes. Within each list a later
/// entry sits above an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    tables: Vec<Table>,
    /// Last id handed out; shared by shapes and tables.
    last_id: u64,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ShapeId {
        self.last_id += 1;
        ShapeId(self.last_id)
    }

    /// Insert a new shape and return it.
    pub fn add_shape(&mut self, kind: ShapeKind, origin: Point, size: Size) -> &Shape {
        let id = self.next_id();
        let shape = Shape::new(id, kind, Rect::from_origin_size(origin, size));
        log::debug!("Added {} {}", shape.kind.name(), id);
        let index = self.shapes.len();
        self.shapes.push(shape);
        &self.shapes[index]
    }

    /// Insert a new table with every cell empty.
    pub fn add_table(&mut self, origin: Point, rows: usize, cols: usize, cell: Size) -> &Table {
        let id = self.next_id();
        let table = Table::new(id, origin, rows, cols, cell.width, cell.height);
        log::debug!("Added {}x{} table {}", table.rows(), table.cols(), id);
        let index = self.tables.len();
        self.tables.push(table);
        &self.tables[index]
    }

    /// Shapes in creation order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Tables in creation order (back to front).
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn table(&self, id: ShapeId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id() == id)
    }

    pub fn table_mut(&mut self, id: ShapeId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id() == id)
    }

    /// Swap the whole shape list, returning the previous one.
    ///
    /// Used by undo/redo. The id counter is not rewound, so ids stay unique
    /// even after restoring an older list.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) -> Vec<Shape> {
        std::mem::replace(&mut self.shapes, shapes)
    }

    /// Apply a style delta to one shape. Returns false if the id is unknown.
    pub fn update_style(&mut self, id: ShapeId, delta: &StyleDelta) -> bool {
        match self.shape_mut(id) {
            Some(shape) => {
                shape.apply_style(delta);
                true
            }
            None => false,
        }
    }

    /// Store a cell's text and grow the table's shared cell height to fit it.
    ///
    /// Returns false when the table or the cell does not exist.
    pub fn commit_cell(
        &mut self,
        table_id: ShapeId,
        cell: CellRef,
        text: &str,
        measure: &dyn TextMeasure,
    ) -> bool {
        let Some(table) = self.table_mut(table_id) else {
            return false;
        };
        if !table.set_cell(cell, text.to_string()) {
            return false;
        }
        let font = TextStyle::table_cell();
        let height = reflow::reflow(text, table.cell_width, table.cell_height, &font, measure);
        if height > table.cell_height {
            log::debug!(
                "Table {} cell height {} -> {}",
                table_id,
                table.cell_height,
                height
            );
            table.cell_height = height;
        }
        true
    }

    /// Remove every shape and table.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.tables.clear();
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.tables.is_empty()
    }

    /// Bounding box of everything in the document.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(Shape::bounds)
            .chain(self.tables.iter().map(Table::bounds))
            .reduce(|a, b| a.union(b))
    }
}
