//! Painter abstraction and scene walker.

use crate::images::{DecodedImage, ImageCache};
use kurbo::{Affine, Circle, Line, Point, Rect, Size};
use peniko::Color;
use sketchboard_core::canvas::Canvas;
use sketchboard_core::config::RenderMode;
use sketchboard_core::reflow::{self, TextMeasure};
use sketchboard_core::shapes::{Shape, ShapeKind, Table, TextContent, TextStyle};
use thiserror::Error;

/// Outline width for primitives and image frames.
pub const OUTLINE_WIDTH: f64 = 2.0;
/// Width of text underlines and table borders.
pub const HAIRLINE_WIDTH: f64 = 1.0;
/// Gap between a text baseline and its underline.
pub const UNDERLINE_OFFSET: f64 = 2.0;
/// Horizontal inset of cell text from the cell's left border.
pub const CELL_TEXT_INSET: f64 = 5.0;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport size {0:?}")]
    InvalidViewport(Size),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// The 2D drawing backend.
///
/// Coordinates are in whatever space the current transform maps to the
/// surface. Text is positioned by its baseline origin.
pub trait Painter {
    fn set_transform(&mut self, transform: Affine);
    /// Fill the whole surface, ignoring the transform.
    fn clear(&mut self, viewport: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    fn stroke_circle(&mut self, circle: Circle, color: Color, width: f64);
    fn stroke_line(&mut self, line: Line, color: Color, width: f64);
    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle, color: Color);
    /// Draw a bitmap scaled into `dest`.
    fn draw_image(&mut self, image: &DecodedImage, dest: Rect);
    /// Present the frame. Backends that paint immediately can keep the default.
    fn finish(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in surface pixels.
    pub viewport_size: Size,
    /// Decoded bitmaps for image shapes; without one, images are skipped.
    pub images: Option<&'a ImageCache>,
    /// Text color for text shapes and cells.
    pub text_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            images: None,
            text_color: Color::BLACK,
        }
    }

    /// Paint image shapes from this cache.
    pub fn with_images(mut self, images: &'a ImageCache) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background_color(&self) -> Color {
        self.canvas.background_color().into()
    }
}

/// Where geometry is mapped before it reaches the painter.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Applied to every coordinate by the walker itself.
    map: Affine,
    /// Font scale matching `map`.
    scale: f64,
}

impl Frame {
    fn rect(&self, rect: Rect) -> Rect {
        self.map.transform_rect_bbox(rect)
    }

    fn point(&self, point: Point) -> Point {
        self.map * point
    }

    fn font(&self, style: &TextStyle) -> TextStyle {
        TextStyle {
            font_size: style.font_size * self.scale,
            ..style.clone()
        }
    }
}

/// Paint one frame of the canvas.
///
/// Shapes are painted in creation order, then tables above them.
pub fn render_scene(ctx: &RenderContext, painter: &mut dyn Painter) -> RenderResult<()> {
    let size = ctx.viewport_size;
    if !(size.is_finite() && size.width > 0.0 && size.height > 0.0) {
        return Err(RendererError::InvalidViewport(size));
    }
    let canvas = ctx.canvas;
    let viewport = Rect::from_origin_size(Point::ORIGIN, size);
    painter.set_transform(Affine::IDENTITY);
    painter.clear(viewport, ctx.background_color());

    let camera = canvas.camera().transform();
    let frame = match canvas.config().render_mode {
        RenderMode::Transformed => {
            painter.set_transform(camera);
            Frame {
                map: Affine::IDENTITY,
                scale: 1.0,
            }
        }
        RenderMode::Direct => Frame {
            map: camera,
            scale: canvas.camera().zoom,
        },
    };

    let measure = canvas.measure();
    let document = canvas.document();
    for shape in document.shapes() {
        render_shape(ctx, painter, shape, frame, measure);
    }
    if canvas.config().tables_enabled {
        for table in document.tables() {
            render_table(ctx, painter, table, frame, measure);
        }
    }

    painter.finish()
}

fn render_shape(
    ctx: &RenderContext,
    painter: &mut dyn Painter,
    shape: &Shape,
    frame: Frame,
    measure: &dyn TextMeasure,
) {
    let bounds = frame.rect(shape.bounds());
    let outline = shape.outline_color();
    match &shape.kind {
        ShapeKind::Rectangle => painter.stroke_rect(bounds, outline, OUTLINE_WIDTH),
        ShapeKind::Circle => {
            // Diameter follows the width; the height only affects the hit box.
            let circle = Circle::new(bounds.center(), bounds.width() / 2.0);
            painter.stroke_circle(circle, outline, OUTLINE_WIDTH);
        }
        ShapeKind::Image(source) => {
            let Some(image) = ctx.images.and_then(|cache| cache.get(source)) else {
                log::trace!("Image {} not ready, skipping", shape.id());
                return;
            };
            painter.draw_image(image, bounds);
            painter.stroke_rect(bounds, outline, OUTLINE_WIDTH);
        }
        ShapeKind::Text(text) => render_text(ctx, painter, shape, text, frame, measure),
    }
}

fn render_text(
    ctx: &RenderContext,
    painter: &mut dyn Painter,
    shape: &Shape,
    text: &TextContent,
    frame: Frame,
    measure: &dyn TextMeasure,
) {
    if text.content.is_empty() {
        return;
    }
    let font = frame.font(&text.style);
    let baseline = Point::new(shape.position.x, shape.position.y + text.baseline());
    let origin = frame.point(baseline);
    painter.fill_text(&text.content, origin, &font, ctx.text_color);

    if text.style.underline {
        let width = measure.measure(&text.content, &font);
        let y = origin.y + UNDERLINE_OFFSET * frame.scale;
        let line = Line::new((origin.x, y), (origin.x + width, y));
        painter.stroke_line(line, ctx.text_color, HAIRLINE_WIDTH);
    }
}

fn render_table(
    ctx: &RenderContext,
    painter: &mut dyn Painter,
    table: &Table,
    frame: Frame,
    measure: &dyn TextMeasure,
) {
    let font = TextStyle::table_cell();
    let painted_font = frame.font(&font);
    for cell in table.cells() {
        let cell_bounds = table.cell_bounds(cell);
        painter.stroke_rect(frame.rect(cell_bounds), ctx.text_color, HAIRLINE_WIDTH);

        let text = table.cell(cell).unwrap_or_default();
        if text.is_empty() {
            continue;
        }
        // Wrap with the unscaled font so lines match what the commit measured.
        let layout = reflow::layout_cell(text, table.cell_width, &font, measure);
        for (baseline, line) in layout.baselines() {
            let origin = Point::new(cell_bounds.x0 + CELL_TEXT_INSET, cell_bounds.y0 + baseline);
            painter.fill_text(line, frame.point(origin), &painted_font, ctx.text_color);
        }
    }
}
