//! Sketchboard Render Library
//!
//! Painter abstraction, scene walker and background image loading for
//! Sketchboard. Hosts implement [`Painter`] for their 2D backend.

pub mod images;
mod renderer;

pub use images::{DecodedImage, ImageCache, ImageError, ImageState};
pub use renderer::{Painter, RenderContext, RenderResult, RendererError, render_scene};
