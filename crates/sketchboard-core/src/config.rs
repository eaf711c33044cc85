//! Engine configuration.
//!
//! The editor used to exist as several near-identical variants; the
//! behaviors that differed between them are switches here.

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::hit::EDGE_THRESHOLD;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How the renderer maps scene coordinates to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Set a translate+scale transform once and paint scene coordinates.
    #[default]
    Transformed,
    /// Convert every box to screen coordinates before painting.
    Direct,
}

/// Default placement and size for newly added objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub shape_origin: Point,
    pub primitive_size: Size,
    pub text_size: Size,
    pub image_size: Size,
    pub table_origin: Point,
    pub cell_size: Size,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            shape_origin: Point::new(50.0, 50.0),
            primitive_size: Size::new(100.0, 100.0),
            text_size: Size::new(200.0, 50.0),
            image_size: Size::new(150.0, 150.0),
            table_origin: Point::new(100.0, 100.0),
            cell_size: Size::new(100.0, 40.0),
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Allow adding and interacting with tables.
    pub tables_enabled: bool,
    /// Write dragged shape positions as `(pointer - grab) * zoom`, matching
    /// the behavior of older editor builds.
    pub legacy_drag_zoom_scaling: bool,
    pub render_mode: RenderMode,
    /// Edge distance that starts a resize on pointer-down.
    pub edge_threshold: f64,
    /// Edge distance that changes the hover cursor.
    pub hover_threshold: f64,
    /// Maximum undo depth; `null` keeps everything.
    pub history_limit: Option<usize>,
    pub placement: Placement,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables_enabled: true,
            legacy_drag_zoom_scaling: false,
            render_mode: RenderMode::default(),
            edge_threshold: EDGE_THRESHOLD,
            hover_threshold: 15.0,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            placement: Placement::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.edge_threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "edge_threshold",
                reason: format!("must be non-negative, got {}", self.edge_threshold),
            });
        }
        if !(self.hover_threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "hover_threshold",
                reason: format!("must be non-negative, got {}", self.hover_threshold),
            });
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "history_limit",
                reason: "must be at least 1 (use null for no limit)".to_string(),
            });
        }
        let placement = &self.placement;
        for (field, size) in [
            ("placement.primitive_size", placement.primitive_size),
            ("placement.text_size", placement.text_size),
            ("placement.image_size", placement.image_size),
            ("placement.cell_size", placement.cell_size),
        ] {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}x{}", size.width, size.height),
                });
            }
        }
        Ok(())
    }
}
