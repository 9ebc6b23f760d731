//! `XlGrid` - the JavaScript entry point for the Canvas 2D grid.
//!
//! Wraps a [`GridEngine`] over a [`CanvasSurface`]. Data bundles, configs and
//! query results cross the boundary as plain JS objects via
//! `serde_wasm_bindgen`.

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::GridConfig;
use crate::engine::GridEngine;
use crate::render::CanvasSurface;
use crate::types::{Axis, Cell, GridData, ScrollUpdate, Style};

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Canvas-backed spreadsheet grid
#[wasm_bindgen]
pub struct XlGrid {
    engine: GridEngine<CanvasSurface>,
}

#[wasm_bindgen]
impl XlGrid {
    /// Create a grid drawing into `canvas`.
    ///
    /// `config` is an optional partial `GridConfig` object; missing fields
    /// take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue, dpr: f64) -> Result<XlGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_err)?
        };

        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        let logical_width = f64::from(canvas.width().max(1)) / dpr;
        let logical_height = f64::from(canvas.height().max(1)) / dpr;

        let mut surface = CanvasSurface::new(canvas)?;
        surface.resize(logical_width, logical_height, dpr);

        let mut engine = GridEngine::new(surface, config)?;
        engine.render()?;
        Ok(XlGrid { engine })
    }

    /// Load a (possibly partial) data bundle object
    #[wasm_bindgen]
    pub fn load(&mut self, data: JsValue) -> Result<(), JsValue> {
        let data: GridData = serde_wasm_bindgen::from_value(data).map_err(to_js_err)?;
        Ok(self.engine.load(data)?)
    }

    /// Export the full data bundle as an object
    #[wasm_bindgen]
    pub fn export(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.export()).map_err(to_js_err)
    }

    /// Resize the canvas backing store (logical size times `dpr`) and redraw
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
        self.engine.surface_mut().resize(width, height, dpr);
        Ok(self.engine.render()?)
    }

    #[wasm_bindgen]
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<(), JsValue> {
        Ok(self.engine.set_row_height(row, height)?)
    }

    #[wasm_bindgen]
    pub fn set_col_width(&mut self, col: u32, width: f64) -> Result<(), JsValue> {
        Ok(self.engine.set_col_width(col, width)?)
    }

    #[wasm_bindgen]
    pub fn reset_row_height(&mut self, row: u32) -> Result<(), JsValue> {
        Ok(self.engine.reset_size(Axis::Rows, row)?)
    }

    #[wasm_bindgen]
    pub fn reset_col_width(&mut self, col: u32) -> Result<(), JsValue> {
        Ok(self.engine.reset_size(Axis::Columns, col)?)
    }

    /// Set the scroll offset; an omitted axis keeps its current value
    #[wasm_bindgen]
    pub fn set_scroll(&mut self, x: Option<f64>, y: Option<f64>) -> Result<(), JsValue> {
        Ok(self.engine.scroll(ScrollUpdate { x, y })?)
    }

    #[wasm_bindgen]
    pub fn set_cell(
        &mut self,
        row: u32,
        col: u32,
        text: String,
        style_index: Option<usize>,
    ) -> Result<(), JsValue> {
        let cell = Cell { text, style_index };
        self.engine.set_cell(row, col, cell)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn remove_cell(&mut self, row: u32, col: u32) -> Result<(), JsValue> {
        self.engine.remove_cell(row, col)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_default_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        let style: Style = serde_wasm_bindgen::from_value(style).map_err(to_js_err)?;
        Ok(self.engine.set_default_style(style)?)
    }

    /// Cell under a canvas pixel position as `{row, col, rect}`
    #[wasm_bindgen]
    pub fn locate(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.locate(x, y)).map_err(to_js_err)
    }

    /// Displayed text of a cell after formula evaluation
    #[wasm_bindgen]
    pub fn display_text(&self, row: u32, col: u32) -> String {
        self.engine.display_text(row, col)
    }

    /// Get total content width
    #[wasm_bindgen]
    pub fn total_width(&self) -> f64 {
        self.engine.total_width()
    }

    /// Get total content height
    #[wasm_bindgen]
    pub fn total_height(&self) -> f64 {
        self.engine.total_height()
    }

    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        Ok(self.engine.render()?)
    }
}
