//! Sketchboard Application
//!
//! Host harness that wires configuration and logging around a canvas and
//! replays recorded sessions through a painter.

mod app;
pub mod script;

pub use app::{AppConfig, LogPainter, Session};
pub use script::{Action, Script, ScriptError};
