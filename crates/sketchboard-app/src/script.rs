//! Session scripts: a recorded sequence of toolbar actions and pointer events.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use sketchboard_core::PointerEvent;
use sketchboard_core::shapes::{PrimitiveKind, ShapeId, StyleDelta, TextStyle};
use std::path::Path;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color '{0}' at step {1}")]
    InvalidColor(String, usize),
}

/// One step of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddShape {
        kind: PrimitiveKind,
    },
    /// Add text; without a style the canvas's current text style is used.
    AddText {
        content: String,
        #[serde(default)]
        style: Option<TextStyle>,
    },
    AddImage {
        source: String,
    },
    AddTable {
        rows: usize,
        cols: usize,
    },
    SetTextStyle {
        style: TextStyle,
    },
    UpdateStyle {
        id: ShapeId,
        #[serde(flatten)]
        delta: StyleDelta,
    },
    CommitCell {
        table: ShapeId,
        row: usize,
        col: usize,
        text: String,
    },
    /// Commit the cell opened by the last press on a table.
    CommitEdit {
        text: String,
    },
    CancelEdit,
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    ToggleMoveMode,
    ResetScene,
    /// Hex color, e.g. `"#f0f0ff"`.
    SetBackground {
        color: String,
    },
    Pointer {
        event: PointerEvent,
    },
    /// Shorthand for a press, one move and a release.
    Drag {
        from: Point,
        to: Point,
    },
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

/// A whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    pub steps: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check values serde cannot, so a bad script fails before any step runs.
    fn validate(&self) -> Result<(), ScriptError> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Action::SetBackground { color } = step {
                if sketchboard_core::shapes::SerializableColor::from_hex(color).is_none() {
                    return Err(ScriptError::InvalidColor(color.clone(), index));
                }
            }
        }
        Ok(())
    }
}
