//! The drawing-surface engine.
//!
//! [`Canvas`] owns the document, the undo history, the camera and the active
//! gesture. Hosts call its operations from toolbar actions and forward raw
//! pointer events; they keep no authoritative state of their own and render
//! by reading [`Canvas::document`] and [`Canvas::camera`].
//!
//! No operation fails. Empty input, unknown ids and out-of-range cells are
//! ignored; sizes and zoom are clamped.

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::document::Document;
use crate::history::History;
use crate::hit::{self, CursorHint};
use crate::input::{CellEdit, Gesture, PointerEvent, Target, resized_bounds};
use crate::reflow::{ApproxMeasure, TextMeasure};
use crate::shapes::{
    CellRef, ImageSource, MIN_SHAPE_SIZE, PrimitiveKind,
    SerializableColor, Shape, ShapeId, ShapeKind, StyleDelta, Table, TextContent, TextStyle,
};
use kurbo::{Point, Vec2};

/// Runtime state of one drawing surface.
#[derive(Debug)]
pub struct Canvas {
    config: EngineConfig,
    document: Document,
    /// Undo/redo of the shape list. Tables are not recorded.
    history: History<Vec<Shape>>,
    camera: Camera,
    gesture: Gesture,
    move_mode: bool,
    background: SerializableColor,
    cursor: CursorHint,
    /// Font options used by `add_text` when the host does not pass its own.
    text_style: TextStyle,
    edit: Option<CellEdit>,
    focused_text: Option<ShapeId>,
    measure: Box<dyn TextMeasure>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            config,
            document: Document::new(),
            camera: Camera::new(),
            gesture: Gesture::Idle,
            move_mode: false,
            background: SerializableColor::white(),
            cursor: CursorHint::Default,
            text_style: TextStyle::default(),
            edit: None,
            focused_text: None,
            measure: Box::new(ApproxMeasure),
        }
    }

    /// Use the backend's text metrics for cell reflow.
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn is_move_mode(&self) -> bool {
        self.move_mode
    }

    pub fn background_color(&self) -> SerializableColor {
        self.background
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }

    /// The open cell edit session, if any.
    pub fn edit_session(&self) -> Option<&CellEdit> {
        self.edit.as_ref()
    }

    /// The text shape last clicked, for showing its style in the toolbar.
    pub fn focused_text(&self) -> Option<&Shape> {
        self.focused_text.and_then(|id| self.document.shape(id))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record the current shape list before a mutation.
    fn snapshot(&mut self) {
        self.history.push(&self.document.shapes().to_vec());
    }

    // --- Scene operations ---

    /// Add a rectangle or circle at the default placement.
    pub fn add_shape(&mut self, kind: PrimitiveKind) -> &Shape {
        self.snapshot();
        let placement = &self.config.placement;
        let (origin, size) = (placement.shape_origin, placement.primitive_size);
        self.document.add_shape(kind.into(), origin, size)
    }

    /// Add a text shape. Empty content is ignored.
    pub fn add_text(&mut self, content: &str, style: TextStyle) -> Option<&Shape> {
        if content.is_empty() {
            log::debug!("Ignoring empty text");
            return None;
        }
        self.snapshot();
        let placement = &self.config.placement;
        let (origin, size) = (placement.shape_origin, placement.text_size);
        let kind = ShapeKind::Text(TextContent::new(content, style));
        Some(self.document.add_shape(kind, origin, size))
    }

    /// Add a text shape using the current font options.
    pub fn add_text_with_current_style(&mut self, content: &str) -> Option<&Shape> {
        let style = self.text_style.clone();
        self.add_text(content, style)
    }

    /// Add an image shape referencing an external bitmap.
    pub fn add_image(&mut self, source: ImageSource) -> &Shape {
        self.snapshot();
        let placement = &self.config.placement;
        let (origin, size) = (placement.shape_origin, placement.image_size);
        self.document.add_shape(ShapeKind::Image(source), origin, size)
    }

    /// Add a table with every cell empty. Counts below one become one.
    ///
    /// Returns `None` when tables are disabled.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> Option<&Table> {
        if !self.config.tables_enabled {
            log::debug!("Tables are disabled; ignoring add_table");
            return None;
        }
        let placement = &self.config.placement;
        let (origin, cell) = (placement.table_origin, placement.cell_size);
        Some(self.document.add_table(origin, rows, cols, cell))
    }

    /// Replace the font options used for new text.
    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    /// Apply a style delta to one shape. Unknown ids and empty deltas are ignored.
    pub fn update_shape_style(&mut self, id: ShapeId, delta: &StyleDelta) -> bool {
        if delta.is_empty() || self.document.shape(id).is_none() {
            log::debug!("Ignoring style update for {}", id);
            return false;
        }
        self.snapshot();
        self.document.update_style(id, delta)
    }

    /// Store text in a table cell and reflow the table's row height.
    pub fn commit_table_cell(&mut self, table_id: ShapeId, row: usize, col: usize, text: &str) -> bool {
        let committed =
            self.document
                .commit_cell(table_id, CellRef::new(row, col), text, self.measure.as_ref());
        if !committed {
            log::debug!("Ignoring commit to {} ({}, {})", table_id, row, col);
        }
        committed
    }

    /// Commit the open edit session with `text` and close it.
    pub fn commit_edit(&mut self, text: &str) -> bool {
        match self.edit.take() {
            Some(edit) => self.commit_table_cell(edit.table_id, edit.cell.row, edit.cell.col, text),
            None => false,
        }
    }

    /// Close the open edit session without changing the cell.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn undo(&mut self) -> bool {
        let current = self.document.shapes().to_vec();
        match self.history.undo(current) {
            Some(previous) => {
                self.document.replace_shapes(previous);
                self.forget_missing_targets();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.document.shapes().to_vec();
        match self.history.redo(current) {
            Some(next) => {
                self.document.replace_shapes(next);
                self.forget_missing_targets();
                true
            }
            None => false,
        }
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    /// Switch between editing and panning. Returns the new mode.
    pub fn toggle_move_mode(&mut self) -> bool {
        self.move_mode = !self.move_mode;
        log::debug!("Move mode {}", if self.move_mode { "on" } else { "off" });
        self.move_mode
    }

    /// Remove every shape and table and reset the view.
    ///
    /// The removal is recorded, so `undo` brings the shapes back.
    pub fn reset_scene(&mut self) {
        self.snapshot();
        self.document.clear();
        self.camera.reset();
        self.gesture = Gesture::Idle;
        self.cursor = CursorHint::Default;
        self.edit = None;
        self.focused_text = None;
    }

    pub fn set_background_color(&mut self, color: SerializableColor) {
        self.background = color;
    }

    // --- Pointer events ---

    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Start a gesture at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        let scene = self.camera.screen_to_scene(screen);

        if self.move_mode {
            self.begin(Gesture::Panning { anchor: scene });
            return;
        }

        if self.config.tables_enabled {
            if let Some(table) = hit::table_at(scene, self.document.tables()) {
                let id = table.id();
                let bounds = table.bounds();
                let grab = scene - bounds.origin();
                if let Some(direction) = hit::table_edge_proximity(scene, table, self.config.edge_threshold) {
                    self.begin(Gesture::Resizing {
                        target: Target::Table(id),
                        direction,
                        grab,
                        start: bounds,
                    });
                } else if let Some(cell) = hit::table_cell_at(scene, table) {
                    let initial_text = table.cell(cell).unwrap_or_default().to_string();
                    log::debug!("Editing {} cell ({}, {})", id, cell.row, cell.col);
                    self.edit = Some(CellEdit {
                        table_id: id,
                        cell,
                        initial_text,
                    });
                    self.focused_text = None;
                    self.begin(Gesture::Idle);
                } else {
                    self.focused_text = None;
                    self.begin(Gesture::Dragging {
                        target: Target::Table(id),
                        grab,
                    });
                }
                return;
            }
        }

        let Some(shape) = hit::shape_at(scene, self.document.shapes()) else {
            self.focused_text = None;
            self.begin(Gesture::Idle);
            return;
        };
        let id = shape.id();
        let bounds = shape.bounds();
        let grab = scene - bounds.origin();
        self.focused_text = shape.is_text().then_some(id);

        let gesture = match hit::edge_proximity(scene, shape, self.config.edge_threshold) {
            Some(direction) => Gesture::Resizing {
                target: Target::Shape(id),
                direction,
                grab,
                start: bounds,
            },
            None => Gesture::Dragging {
                target: Target::Shape(id),
                grab,
            },
        };
        self.begin(gesture);
    }

    /// Continue the active gesture and refresh the cursor hint.
    pub fn pointer_move(&mut self, screen: Point) {
        let scene = self.camera.screen_to_scene(screen);

        match self.gesture.clone() {
            Gesture::Idle => {}
            Gesture::Panning { anchor } => {
                self.camera.pan_to(anchor, screen);
            }
            Gesture::Dragging { target, grab } => self.drag_tick(target, scene, grab),
            Gesture::Resizing {
                target,
                direction,
                grab,
                start,
            } => {
                let delta = scene - (start.origin() + grab);
                match target {
                    Target::Shape(id) => {
                        let bounds = resized_bounds(start, direction, delta, (MIN_SHAPE_SIZE, MIN_SHAPE_SIZE));
                        self.snapshot();
                        if let Some(shape) = self.document.shape_mut(id) {
                            shape.set_bounds(bounds);
                            log::trace!("Resized {} to {:?}", id, bounds);
                        }
                    }
                    Target::Table(id) => {
                        let bounds = resized_bounds(start, direction, delta, (0.0, 0.0));
                        if let Some(table) = self.document.table_mut(id) {
                            table.fit_outer(bounds, direction.moves_left(), direction.moves_top());
                            log::trace!("Resized table {} to {:?}", id, table.bounds());
                        }
                    }
                }
            }
        }

        self.cursor = self.hover_cursor(scene);
    }

    /// End the active gesture.
    pub fn pointer_up(&mut self) {
        if !self.gesture.is_idle() {
            log::debug!("Gesture ended: {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
        self.cursor = CursorHint::Default;
    }

    fn begin(&mut self, gesture: Gesture) {
        if !gesture.is_idle() {
            log::debug!("Gesture started: {:?}", gesture);
        }
        self.gesture = gesture;
    }

    fn drag_tick(&mut self, target: Target, scene: Point, grab: Vec2) {
        let position = scene - grab;
        match target {
            Target::Shape(id) => {
                let position = if self.config.legacy_drag_zoom_scaling {
                    Point::new(position.x * self.camera.zoom, position.y * self.camera.zoom)
                } else {
                    position
                };
                self.snapshot();
                if let Some(shape) = self.document.shape_mut(id) {
                    shape.position = position;
                    log::trace!("Dragged {} to {:?}", id, position);
                }
            }
            Target::Table(id) => {
                if let Some(table) = self.document.table_mut(id) {
                    table.origin = position;
                    log::trace!("Dragged table {} to {:?}", id, position);
                }
            }
        }
    }

    /// Cursor for the pointer at `scene`, from edge proximity of whatever is under it.
    fn hover_cursor(&self, scene: Point) -> CursorHint {
        if let Gesture::Dragging {
            target: Target::Table(_),
            ..
        } = self.gesture
        {
            return CursorHint::Move;
        }
        let threshold = self.config.hover_threshold;
        if self.config.tables_enabled {
            if let Some(table) = hit::table_at(scene, self.document.tables()) {
                return hit::table_edge_proximity(scene, table, threshold)
                    .map_or(CursorHint::Move, |direction| direction.cursor());
            }
        }
        hit::shape_at(scene, self.document.shapes())
            .and_then(|shape| hit::edge_proximity(scene, shape, threshold))
            .map_or(CursorHint::Default, |direction| direction.cursor())
    }

    /// Drop references to shapes that an undo/redo removed.
    fn forget_missing_targets(&mut self) {
        if let Some(Target::Shape(id)) = self.gesture.target() {
            if self.document.shape(id).is_none() {
                self.gesture = Gesture::Idle;
            }
        }
        if let Some(id) = self.focused_text {
            if self.document.shape(id).is_none() {
                self.focused_text = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MAX_ZOOM;
    use crate::shapes::{MIN_CELL_HEIGHT, MIN_CELL_WIDTH};
    use kurbo::Rect;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn drag(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.pointer_down(from);
        canvas.pointer_move(to);
        canvas.pointer_up();
    }

    #[test]
    fn test_add_shape_defaults() {
        let mut canvas = Canvas::new();
        let shape = canvas.add_shape(PrimitiveKind::Rectangle);
        assert_eq!(shape.bounds(), Rect::new(50.0, 50.0, 150.0, 150.0));
        assert!(matches!(shape.kind, ShapeKind::Rectangle));
        assert!(canvas.can_undo());
    }

    #[test]
    fn test_add_text_ignores_empty() {
        let mut canvas = Canvas::new();
        assert!(canvas.add_text("", TextStyle::default()).is_none());
        assert!(canvas.document().is_empty());
        assert!(!canvas.can_undo());

        let shape = canvas.add_text("Hello", TextStyle::default()).unwrap();
        assert_eq!(shape.bounds(), Rect::new(50.0, 50.0, 250.0, 100.0));
        assert_eq!(shape.as_text().unwrap().content, "Hello");
    }

    #[test]
    fn test_add_text_with_current_style() {
        let mut canvas = Canvas::new();
        let style = TextStyle {
            bold: true,
            font_size: 24.0,
            ..Default::default()
        };
        canvas.set_text_style(style.clone());
        let shape = canvas.add_text_with_current_style("Title").unwrap();
        assert_eq!(shape.as_text().unwrap().style, style);
    }

    #[test]
    fn test_add_image() {
        let mut canvas = Canvas::new();
        let shape = canvas.add_image(ImageSource::new("photo.png"));
        assert_eq!(shape.bounds(), Rect::new(50.0, 50.0, 200.0, 200.0));
        assert_eq!(shape.as_image().map(ImageSource::as_str), Some("photo.png"));
    }

    #[test]
    fn test_add_table_and_commit_cell() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(3, 3).unwrap().id();
        assert!(canvas.commit_table_cell(id, 0, 0, "hello"));

        let table = canvas.document().table(id).unwrap();
        assert_eq!(table.data()[0][0], "hello");
        for cell in table.cells().filter(|c| *c != CellRef::new(0, 0)) {
            assert_eq!(table.cell(cell), Some(""));
        }
    }

    #[test]
    fn test_add_table_coerces_counts() {
        let mut canvas = Canvas::new();
        let table = canvas.add_table(0, 0).unwrap();
        assert_eq!((table.rows(), table.cols()), (1, 1));
    }

    #[test]
    fn test_tables_disabled() {
        let config = EngineConfig {
            tables_enabled: false,
            ..Default::default()
        };
        let mut canvas = Canvas::with_config(config);
        assert!(canvas.add_table(2, 2).is_none());
    }

    #[test]
    fn test_drag_then_undo() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        drag(&mut canvas, Point::new(60.0, 60.0), Point::new(200.0, 200.0));

        let after = canvas.document().shape(id).unwrap().position;
        assert_ne!(after, Point::new(50.0, 50.0));
        assert!(canvas.gesture().is_idle());

        assert!(canvas.undo());
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(50.0, 50.0));
        assert!(canvas.redo());
        assert_eq!(canvas.document().shape(id).unwrap().position, after);
    }

    #[test]
    fn test_drag_moves_by_pointer_offset() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        canvas.pointer_down(Point::new(100.0, 100.0));
        assert!(matches!(canvas.gesture(), Gesture::Dragging { .. }));
        canvas.pointer_move(Point::new(240.0, 240.0));
        canvas.pointer_up();
        let shape = canvas.document().shape(id).unwrap();
        assert_eq!(shape.position, Point::new(190.0, 190.0));
        assert!(approx(shape.width, 100.0));
    }

    #[test]
    fn test_drag_when_zoomed() {
        let mut canvas = Canvas::new();
        canvas.zoom_in();
        canvas.zoom_in();
        let id = canvas.add_shape(PrimitiveKind::Circle).id();
        // Scene (100,100) is screen (120,120) at zoom 1.2.
        drag(&mut canvas, Point::new(120.0, 120.0), Point::new(180.0, 120.0));
        let position = canvas.document().shape(id).unwrap().position;
        assert!(approx(position.x, 100.0));
        assert!(approx(position.y, 50.0));
    }

    #[test]
    fn test_legacy_drag_scaling() {
        let config = EngineConfig {
            legacy_drag_zoom_scaling: true,
            ..Default::default()
        };
        let mut canvas = Canvas::with_config(config);
        canvas.zoom_in();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        // Scene (100,100) is screen (110,110) at zoom 1.1.
        drag(&mut canvas, Point::new(110.0, 110.0), Point::new(154.0, 110.0));
        let position = canvas.document().shape(id).unwrap().position;
        assert!(approx(position.x, 90.0 * 1.1));
        assert!(approx(position.y, 50.0 * 1.1));
    }

    #[test]
    fn test_resize_right_edge() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        canvas.pointer_down(Point::new(148.0, 100.0));
        assert!(matches!(canvas.gesture(), Gesture::Resizing { .. }));
        canvas.pointer_move(Point::new(198.0, 120.0));
        canvas.pointer_up();
        assert_eq!(
            canvas.document().shape(id).unwrap().bounds(),
            Rect::new(50.0, 50.0, 200.0, 150.0)
        );
    }

    #[test]
    fn test_undo_steps_back_one_drag_tick() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        canvas.pointer_down(Point::new(100.0, 100.0));
        for x in [110.0, 120.0, 130.0] {
            canvas.pointer_move(Point::new(x, 100.0));
        }
        canvas.pointer_up();
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(80.0, 50.0));

        assert!(canvas.undo());
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(70.0, 50.0));
        assert!(canvas.undo());
        assert!(canvas.undo());
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_resize_then_undo() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        canvas.pointer_down(Point::new(148.0, 100.0));
        canvas.pointer_move(Point::new(198.0, 120.0));
        canvas.pointer_up();

        assert!(canvas.undo());
        assert_eq!(
            canvas.document().shape(id).unwrap().bounds(),
            Rect::new(50.0, 50.0, 150.0, 150.0)
        );
        assert!(canvas.redo());
        assert_eq!(
            canvas.document().shape(id).unwrap().bounds(),
            Rect::new(50.0, 50.0, 200.0, 150.0)
        );
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        // Top-left corner dragged far past the bottom-right one.
        drag(&mut canvas, Point::new(50.0, 50.0), Point::new(400.0, 400.0));
        let shape = canvas.document().shape(id).unwrap();
        assert!(shape.width >= MIN_SHAPE_SIZE && shape.height >= MIN_SHAPE_SIZE);
        assert_eq!(shape.bounds(), Rect::new(140.0, 140.0, 150.0, 150.0));
    }

    #[test]
    fn test_table_resize_clamps_cells() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(2, 2).unwrap().id();
        // Bottom-right corner of the 200x80 table at (100,100).
        drag(&mut canvas, Point::new(300.0, 180.0), Point::new(0.0, 0.0));
        let table = canvas.document().table(id).unwrap();
        assert!(table.cell_width >= MIN_CELL_WIDTH);
        assert!(table.cell_height >= MIN_CELL_HEIGHT);
        assert_eq!(table.origin, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_cell_press_opens_edit_without_dragging() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(2, 2).unwrap().id();
        canvas.pointer_down(Point::new(150.0, 120.0));

        let edit = canvas.edit_session().unwrap();
        assert_eq!(edit.table_id, id);
        assert_eq!(edit.cell, CellRef::new(0, 0));
        assert!(canvas.gesture().is_idle());

        canvas.pointer_move(Point::new(170.0, 150.0));
        assert_eq!(canvas.cursor(), CursorHint::Move);
        canvas.pointer_up();
        assert_eq!(canvas.document().table(id).unwrap().origin, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_table_drag_tick() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(2, 2).unwrap().id();
        canvas.gesture = Gesture::Dragging {
            target: Target::Table(id),
            grab: Vec2::new(50.0, 20.0),
        };
        canvas.pointer_move(Point::new(170.0, 150.0));
        assert_eq!(canvas.cursor(), CursorHint::Move);
        canvas.pointer_up();
        assert_eq!(canvas.document().table(id).unwrap().origin, Point::new(120.0, 130.0));
        // Table moves are not recorded.
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_edit_session_commit_and_cancel() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(2, 3).unwrap().id();
        canvas.commit_table_cell(id, 1, 2, "old");

        // Cell (1,2) spans x in [300,400), y in [140,180).
        canvas.pointer_down(Point::new(350.0, 160.0));
        canvas.pointer_up();
        let edit = canvas.edit_session().unwrap();
        assert_eq!(edit.cell, CellRef::new(1, 2));
        assert_eq!(edit.initial_text, "old");

        canvas.cancel_edit();
        assert!(canvas.edit_session().is_none());
        assert!(!canvas.commit_edit("ignored"));

        canvas.pointer_down(Point::new(350.0, 160.0));
        assert!(canvas.commit_edit("new"));
        assert!(canvas.edit_session().is_none());
        assert_eq!(canvas.document().table(id).unwrap().cell(CellRef::new(1, 2)), Some("new"));
    }

    #[test]
    fn test_commit_out_of_range_is_noop() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(2, 2).unwrap().id();
        assert!(!canvas.commit_table_cell(id, 5, 0, "x"));
        assert!(!canvas.commit_table_cell(ShapeId(99), 0, 0, "x"));
    }

    #[test]
    fn test_commit_reflows_height() {
        let mut canvas = Canvas::new();
        let id = canvas.add_table(1, 1).unwrap().id();
        let long = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj kkkk";
        assert!(canvas.commit_table_cell(id, 0, 0, long));
        let table = canvas.document().table(id).unwrap();
        assert!(table.cell_height > 40.0);
    }

    #[test]
    fn test_tables_are_not_in_history() {
        let mut canvas = Canvas::new();
        canvas.add_table(1, 1);
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_update_shape_style() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text("Hi", TextStyle::default()).unwrap().id();
        let before = canvas.document().shapes().to_vec();

        let delta = StyleDelta {
            content: Some("Bye".to_string()),
            italic: Some(true),
            ..Default::default()
        };
        assert!(canvas.update_shape_style(id, &delta));
        let text = canvas.document().shape(id).unwrap().as_text().unwrap();
        assert_eq!(text.content, "Bye");
        assert!(text.style.italic);

        assert!(canvas.undo());
        assert_eq!(canvas.document().shapes(), before.as_slice());

        assert!(!canvas.update_shape_style(ShapeId(77), &delta));
        assert!(!canvas.update_shape_style(id, &StyleDelta::default()));
    }

    #[test]
    fn test_undo_redo_on_empty_history() {
        let mut canvas = Canvas::new();
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut canvas = Canvas::new();
        canvas.add_shape(PrimitiveKind::Rectangle);
        assert!(canvas.undo());
        assert!(canvas.can_redo());
        canvas.add_shape(PrimitiveKind::Circle);
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_zoom_clamps() {
        let mut canvas = Canvas::new();
        for _ in 0..30 {
            canvas.zoom_in();
        }
        assert_eq!(canvas.camera().zoom, MAX_ZOOM);
        canvas.zoom_in();
        assert_eq!(canvas.camera().zoom, MAX_ZOOM);
    }

    #[test]
    fn test_move_mode_pans() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        assert!(canvas.toggle_move_mode());

        canvas.pointer_down(Point::new(60.0, 60.0));
        assert!(matches!(canvas.gesture(), Gesture::Panning { .. }));
        canvas.pointer_move(Point::new(100.0, 80.0));
        canvas.pointer_up();

        assert_eq!(canvas.camera().offset, Vec2::new(40.0, 20.0));
        // Shapes are untouched while panning.
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(50.0, 50.0));
        assert!(!canvas.toggle_move_mode());
    }

    #[test]
    fn test_pan_keeps_anchor_under_pointer() {
        let mut canvas = Canvas::new();
        canvas.zoom_in();
        canvas.toggle_move_mode();
        canvas.pointer_down(Point::new(110.0, 110.0));
        let anchor = canvas.camera().screen_to_scene(Point::new(110.0, 110.0));
        canvas.pointer_move(Point::new(300.0, 250.0));
        let under = canvas.camera().screen_to_scene(Point::new(300.0, 250.0));
        assert!(approx(under.x, anchor.x) && approx(under.y, anchor.y));
    }

    #[test]
    fn test_reset_scene() {
        let mut canvas = Canvas::new();
        canvas.add_shape(PrimitiveKind::Rectangle);
        canvas.add_table(2, 2);
        canvas.zoom_in();
        canvas.reset_scene();

        assert!(canvas.document().is_empty());
        assert_eq!(canvas.camera(), &Camera::new());
        assert!(canvas.undo());
        assert_eq!(canvas.document().shapes().len(), 1);
    }

    #[test]
    fn test_background_color() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.background_color(), SerializableColor::white());
        let color = SerializableColor::new(240, 240, 255, 255);
        canvas.set_background_color(color);
        assert_eq!(canvas.background_color(), color);
    }

    #[test]
    fn test_hover_cursor() {
        let mut canvas = Canvas::new();
        canvas.add_shape(PrimitiveKind::Rectangle);
        canvas.pointer_move(Point::new(100.0, 100.0));
        assert_eq!(canvas.cursor(), CursorHint::Default);
        // Within the hover threshold of the right edge.
        canvas.pointer_move(Point::new(137.0, 100.0));
        assert_eq!(canvas.cursor(), CursorHint::EwResize);
        canvas.pointer_move(Point::new(52.0, 52.0));
        assert_eq!(canvas.cursor(), CursorHint::NwseResize);
        canvas.pointer_move(Point::new(500.0, 500.0));
        assert_eq!(canvas.cursor(), CursorHint::Default);
    }

    #[test]
    fn test_hover_cursor_over_table() {
        let mut canvas = Canvas::new();
        canvas.add_table(2, 2);
        canvas.pointer_move(Point::new(200.0, 140.0));
        assert_eq!(canvas.cursor(), CursorHint::Move);
        canvas.pointer_move(Point::new(200.0, 178.0));
        assert_eq!(canvas.cursor(), CursorHint::NsResize);
    }

    #[test]
    fn test_focused_text() {
        let mut canvas = Canvas::new();
        let id = canvas.add_text("Note", TextStyle::default()).unwrap().id();
        canvas.pointer_down(Point::new(150.0, 75.0));
        canvas.pointer_up();
        assert_eq!(canvas.focused_text().map(Shape::id), Some(id));
        canvas.pointer_down(Point::new(600.0, 600.0));
        assert!(canvas.focused_text().is_none());
    }

    #[test]
    fn test_pointer_event_dispatch() {
        let mut canvas = Canvas::new();
        let id = canvas.add_shape(PrimitiveKind::Rectangle).id();
        canvas.handle_pointer_event(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
        });
        canvas.handle_pointer_event(PointerEvent::Move {
            position: Point::new(110.0, 100.0),
        });
        canvas.handle_pointer_event(PointerEvent::Up);
        assert_eq!(canvas.document().shape(id).unwrap().position, Point::new(60.0, 50.0));
    }

    #[test]
    fn test_undo_clears_stale_gesture() {
        let mut canvas = Canvas::new();
        canvas.add_shape(PrimitiveKind::Rectangle);
        canvas.pointer_down(Point::new(100.0, 100.0));
        assert!(canvas.undo());
        assert!(canvas.gesture().is_idle());
        // Further moves are harmless.
        canvas.pointer_move(Point::new(120.0, 120.0));
        assert!(canvas.document().shapes().is_empty());
    }
}
