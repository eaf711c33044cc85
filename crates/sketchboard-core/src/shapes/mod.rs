//! Shape definitions for the drawing surface.

mod image;
mod table;
mod text;

pub use image::ImageSource;
pub use table::{CellRef, MIN_CELL_HEIGHT, MIN_CELL_WIDTH, Table};
pub use text::{FontFamily, TextContent, TextStyle};

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum width and height a shape resize may produce.
pub const MIN_SHAPE_SIZE: f64 = 10.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 | 8 => {
                let r = channel(&hex[0..2])?;
                let g = channel(&hex[2..4])?;
                let b = channel(&hex[4..6])?;
                let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for shapes and tables.
///
/// Ids are handed out by the document from one increasing counter, so a
/// larger id always means a more recently created object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The primitives the toolbar can add without extra input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Rectangle,
    Circle,
}

/// Kind of a shape together with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    /// Painted as a circle of diameter `width` centred in the bounding box.
    Circle,
    Image(ImageSource),
    Text(TextContent),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Image(_) => "image",
            ShapeKind::Text(_) => "text",
        }
    }
}

impl From<PrimitiveKind> for ShapeKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Rectangle => ShapeKind::Rectangle,
            PrimitiveKind::Circle => ShapeKind::Circle,
        }
    }
}

/// A partial style update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDelta {
    pub outline_color: Option<SerializableColor>,
    pub content: Option<String>,
    pub font_family: Option<FontFamily>,
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl StyleDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_text(&self, text: &mut TextContent) {
        if let Some(content) = &self.content {
            text.content.clone_from(content);
        }
        if let Some(family) = self.font_family {
            text.style.font_family = family;
        }
        if let Some(size) = self.font_size {
            text.style.font_size = size;
        }
        if let Some(bold) = self.bold {
            text.style.bold = bold;
        }
        if let Some(italic) = self.italic {
            text.style.italic = italic;
        }
        if let Some(underline) = self.underline {
            text.style.underline = underline;
        }
    }
}

/// A placed primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Outline color; `None` paints with the default (black).
    pub outline: Option<SerializableColor>,
    pub kind: ShapeKind,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, kind: ShapeKind, bounds: Rect) -> Self {
        Self {
            id,
            position: Point::new(bounds.x0, bounds.y0),
            width: bounds.width().max(0.0),
            height: bounds.height().max(0.0),
            outline: None,
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Bounding box in scene coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Outline color with the default applied.
    pub fn outline_color(&self) -> Color {
        self.outline.unwrap_or_else(SerializableColor::black).into()
    }

    pub fn as_text(&self) -> Option<&TextContent> {
        match &self.kind {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageSource> {
        match &self.kind {
            ShapeKind::Image(src) => Some(src),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ShapeKind::Text(_))
    }

    /// Replace the bounding box. Sizes never go negative.
    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.position = Point::new(bounds.x0, bounds.y0);
        self.width = bounds.width().max(0.0);
        self.height = bounds.height().max(0.0);
    }

    /// Apply a style delta. Text fields only affect text shapes.
    pub fn apply_style(&mut self, delta: &StyleDelta) {
        if let Some(color) = delta.outline_color {
            self.outline = Some(color);
        }
        if let ShapeKind::Text(text) = &mut self.kind {
            delta.apply_text(text);
        }
    }
}
