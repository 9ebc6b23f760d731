//! Rendering through a pluggable drawing surface.
//!
//! This module provides:
//! - The `DrawSurface` trait and its attribute types
//! - The frame pipeline (content grid, fixed headers, cell contents)
//! - Canvas 2D and recording surfaces
//! - Color and text layout utilities

pub mod canvas;
pub mod colors;
pub mod headers;
pub mod pipeline;
pub mod recording;
pub mod surface;
pub mod text;

// Re-export commonly used types
pub use canvas::CanvasSurface;
pub use colors::{palette, parse_color, CssColor};
pub use pipeline::{render, RenderParams};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{DrawAttrs, DrawBox, DrawSurface, TextAttrs};
