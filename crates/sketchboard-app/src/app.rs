//! Session host: owns a canvas and an image cache, applies script steps and
//! paints a frame after each one.

use crate::script::{Action, Script};
use kurbo::{Affine, Circle, Line, Point, Rect, Size};
use peniko::Color;
use sketchboard_core::shapes::{ImageSource, SerializableColor, TextStyle};
use sketchboard_core::{Canvas, EngineConfig, PointerEvent};
use sketchboard_render::{
    DecodedImage, ImageCache, Painter, RenderContext, RenderResult, render_scene,
};
use std::path::PathBuf;

/// Host configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Directory relative image paths are resolved against.
    pub image_dir: Option<PathBuf>,
}

/// Painter that logs every draw call instead of rasterizing.
#[derive(Debug, Default)]
pub struct LogPainter {
    /// Draw calls issued in the current frame.
    pub draw_calls: usize,
    pub frames: usize,
}

impl LogPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Painter for LogPainter {
    fn set_transform(&mut self, transform: Affine) {
        log::trace!("transform {:?}", transform.as_coeffs());
    }

    fn clear(&mut self, viewport: Rect, color: Color) {
        self.draw_calls = 0;
        log::trace!("clear {:?} {:?}", viewport, SerializableColor::from(color));
    }

    fn stroke_rect(&mut self, rect: Rect, _color: Color, width: f64) {
        self.draw_calls += 1;
        log::trace!("rect {:?} width {}", rect, width);
    }

    fn stroke_circle(&mut self, circle: Circle, _color: Color, width: f64) {
        self.draw_calls += 1;
        log::trace!("circle {:?} r {} width {}", circle.center, circle.radius, width);
    }

    fn stroke_line(&mut self, line: Line, _color: Color, width: f64) {
        self.draw_calls += 1;
        log::trace!("line {:?} -> {:?} width {}", line.p0, line.p1, width);
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle, _color: Color) {
        self.draw_calls += 1;
        log::trace!("text {:?} at {:?} ({})", text, origin, style.font_shorthand());
    }

    fn draw_image(&mut self, image: &DecodedImage, dest: Rect) {
        self.draw_calls += 1;
        log::trace!("image {}x{} into {:?}", image.width, image.height, dest);
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.frames += 1;
        log::debug!("frame {}: {} draw calls", self.frames, self.draw_calls);
        Ok(())
    }
}

/// A canvas driven by script steps.
#[derive(Debug)]
pub struct Session {
    canvas: Canvas,
    images: ImageCache,
    viewport: Size,
}

impl Session {
    pub fn new(config: AppConfig, viewport: Size) -> Self {
        let images = match config.image_dir {
            Some(dir) => ImageCache::new().with_base_dir(dir),
            None => ImageCache::new(),
        };
        Self {
            canvas: Canvas::with_config(config.engine),
            images,
            viewport,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Apply one step to the canvas.
    pub fn apply(&mut self, action: &Action) {
        let canvas = &mut self.canvas;
        match action {
            Action::AddShape { kind } => {
                canvas.add_shape(*kind);
            }
            Action::AddText { content, style } => {
                match style {
                    Some(style) => canvas.add_text(content, style.clone()),
                    None => canvas.add_text_with_current_style(content),
                };
            }
            Action::AddImage { source } => {
                canvas.add_image(ImageSource::new(source.as_str()));
            }
            Action::AddTable { rows, cols } => {
                canvas.add_table(*rows, *cols);
            }
            Action::SetTextStyle { style } => canvas.set_text_style(style.clone()),
            Action::UpdateStyle { id, delta } => {
                canvas.update_shape_style(*id, delta);
            }
            Action::CommitCell {
                table,
                row,
                col,
                text,
            } => {
                canvas.commit_table_cell(*table, *row, *col, text);
            }
            Action::CommitEdit { text } => {
                canvas.commit_edit(text);
            }
            Action::CancelEdit => canvas.cancel_edit(),
            Action::Undo => {
                canvas.undo();
            }
            Action::Redo => {
                canvas.redo();
            }
            Action::ZoomIn => canvas.zoom_in(),
            Action::ZoomOut => canvas.zoom_out(),
            Action::ToggleMoveMode => {
                canvas.toggle_move_mode();
            }
            Action::ResetScene => canvas.reset_scene(),
            Action::SetBackground { color } => match SerializableColor::from_hex(color) {
                Some(color) => canvas.set_background_color(color),
                None => log::warn!("Ignoring invalid background color {:?}", color),
            },
            Action::Pointer { event } => canvas.handle_pointer_event(*event),
            Action::Drag { from, to } => {
                canvas.handle_pointer_event(PointerEvent::Down { position: *from });
                canvas.handle_pointer_event(PointerEvent::Move { position: *to });
                canvas.handle_pointer_event(PointerEvent::Up);
            }
        }
    }

    /// Pick up finished image loads and paint one frame.
    pub fn render(&mut self, painter: &mut dyn Painter) -> RenderResult<()> {
        self.images.request_all(self.canvas.document());
        self.images.poll();
        let ctx = RenderContext::new(&self.canvas, self.viewport).with_images(&self.images);
        render_scene(&ctx, painter)
    }

    /// Apply every step of `script`, painting after each.
    pub fn run(&mut self, script: &Script, painter: &mut dyn Painter) -> RenderResult<()> {
        for (index, step) in script.steps.iter().enumerate() {
            log::debug!("Step {}: {:?}", index, step);
            self.apply(step);
            self.render(painter)?;
        }
        Ok(())
    }
}
