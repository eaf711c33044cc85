//! Image payload referencing an external bitmap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a bitmap resource (a path or URL).
///
/// The engine never loads the bitmap itself; the renderer resolves the
/// reference asynchronously and paints the shape once it is ready.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSource(String);

impl ImageSource {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageSource {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}
