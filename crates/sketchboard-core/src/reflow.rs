//! Greedy word wrapping for table cells.

use crate::shapes::TextStyle;
use std::fmt;

/// Height added per wrapped line.
pub const LINE_HEIGHT: f64 = 20.0;
/// Extra space added below the last line.
pub const CELL_PADDING: f64 = 10.0;
/// Horizontal room reserved inside a cell (5px each side).
pub const CELL_INSET: f64 = 10.0;

/// Text measurement provided by the rendering backend.
pub trait TextMeasure: fmt::Debug {
    /// Advance width of `text` when set in `font`.
    fn measure(&self, text: &str, font: &TextStyle) -> f64;
}

/// Measurement without font metrics: every character advances half the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

impl ApproxMeasure {
    /// Average advance as a fraction of the font size.
    pub const ADVANCE_RATIO: f64 = 0.5;
}

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, font: &TextStyle) -> f64 {
        text.chars().count() as f64 * font.font_size * Self::ADVANCE_RATIO
    }
}

/// Result of wrapping one cell's text.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    /// Wrapped lines, each keeping its trailing space.
    pub lines: Vec<String>,
}

impl CellLayout {
    /// Height the text needs: one `LINE_HEIGHT` per line plus padding.
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * LINE_HEIGHT + CELL_PADDING
    }

    /// Baseline offsets of each line relative to the cell top.
    pub fn baselines(&self) -> impl Iterator<Item = (f64, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| ((i + 1) as f64 * LINE_HEIGHT, line.as_str()))
    }
}

/// Wrap `text` into lines that fit `cell_width` minus the inset.
///
/// Words are separated by single spaces. A word is appended to the current
/// line while `line + word + " "` fits; otherwise the line is closed and the
/// word starts the next one. The first word never wraps, so a single word
/// wider than the cell stays on line one. Empty text yields one empty line.
pub fn layout_cell(text: &str, cell_width: f64, font: &TextStyle, measure: &dyn TextMeasure) -> CellLayout {
    let max_width = cell_width - CELL_INSET;
    let mut lines = Vec::new();
    let mut line = String::new();

    for (n, word) in text.split(' ').enumerate() {
        let test_line = format!("{line}{word} ");
        if n > 0 && measure.measure(&test_line, font) > max_width {
            lines.push(std::mem::take(&mut line));
            line = format!("{word} ");
        } else {
            line = test_line;
        }
    }
    lines.push(line);

    CellLayout { lines }
}

/// Height a table's cells must have to hold `text`, never less than `current`.
pub fn reflow(
    text: &str,
    cell_width: f64,
    current: f64,
    font: &TextStyle,
    measure: &dyn TextMeasure,
) -> f64 {
    layout_cell(text, cell_width, font, measure)
        .height()
        .max(current)
}
