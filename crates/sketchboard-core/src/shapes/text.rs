//! Text payload and font options.

use serde::{Deserialize, Serialize};

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Arial,
    CourierNew,
    TimesNewRoman,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::CourierNew => "Courier New",
            FontFamily::TimesNewRoman => "Times New Roman",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Arial,
            FontFamily::CourierNew,
            FontFamily::TimesNewRoman,
        ]
    }

    /// Look up a family by its renderer name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }
}

/// The font options bundle applied to text shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: FontFamily,
    /// Font size in pixels.
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    /// Default font size for new text.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Font used for table cells. Cells ignore the text style bundle.
    pub fn table_cell() -> Self {
        Self::default()
    }

    /// CSS-like font shorthand, e.g. `"bold italic 16px Arial"`.
    pub fn font_shorthand(&self) -> String {
        let mut font = String::new();
        if self.bold {
            font.push_str("bold ");
        }
        if self.italic {
            font.push_str("italic ");
        }
        font.push_str(&format!("{}px {}", self.font_size, self.font_family.name()));
        font
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: Self::DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Kind-specific payload of a text shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text content.
    pub content: String,
    pub style: TextStyle,
}

impl TextContent {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Baseline offset from the top of the shape's box.
    pub fn baseline(&self) -> f64 {
        self.style.font_size
    }
}
