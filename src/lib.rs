//! xlgrid - spreadsheet grid geometry, rendering and hit testing
//!
//! Draws a virtual grid of rows and columns with fixed row/column headers
//! onto a pluggable drawing surface (Canvas 2D in the browser, an in-memory
//! recorder elsewhere):
//! - Sparse per-row/column size overrides over a dense default
//! - Indexed style and border tables with field-by-field default merging
//! - Pixel-to-cell hit testing that shares its geometry with rendering
//! - Formula-aware cell text via a pluggable evaluator
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlGrid } from 'xlgrid';
//! await init();
//! const grid = new XlGrid(canvas, { rows: { length: 1000, defaultSize: 25 } }, dpr);
//! grid.load({ cells: { "0": { "0": { text: "Hello" } } } });
//! grid.locate(130, 40);
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use xlgrid::config::GridConfig;
//! use xlgrid::engine::GridEngine;
//! use xlgrid::render::RecordingSurface;
//! use xlgrid::types::Cell;
//!
//! let mut grid = GridEngine::new(RecordingSurface::default(), GridConfig::default())?;
//! grid.set_cell(0, 0, Cell::new("Hello"))?;
//! let hit = grid.locate(70.0, 30.0);
//! assert_eq!((hit.row, hit.col), (0, 0));
//! # Ok::<(), xlgrid::error::XlgridError>(())
//! ```

pub mod cell_ref;
pub mod cells;
pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod styles;
pub mod types;

// Geometry and rendering
pub mod layout;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::XlGrid;

pub use engine::GridEngine;
pub use error::{Result, XlgridError};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
