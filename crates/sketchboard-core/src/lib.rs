//! Sketchboard Core Library
//!
//! Platform-agnostic scene engine for the Sketchboard drawing surface:
//! shapes, tables, hit-testing, undo history and the pointer state machine.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod document;
pub mod history;
pub mod hit;
pub mod input;
pub mod reflow;
pub mod shapes;

pub use camera::Camera;
pub use canvas::Canvas;
pub use config::{ConfigError, EngineConfig, Placement, RenderMode};
pub use document::Document;
pub use history::History;
pub use hit::{CursorHint, ResizeDirection};
pub use input::{CellEdit, Gesture, PointerEvent, Target};
pub use reflow::{ApproxMeasure, CellLayout, TextMeasure};
