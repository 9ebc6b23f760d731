//! The grid engine: owns all state and exposes the load/export, mutation and
//! query surfaces.
//!
//! Every mutation that changes visible output is followed by a full render.
//! Mutations validate their input before touching state, so a rejected call
//! leaves the engine exactly as it was.

use tracing::{debug, warn};

use crate::cells::CellStore;
use crate::config::GridConfig;
use crate::error::{Result, XlgridError};
use crate::formula::{FormulaEvaluator, FormulaTable, TextEvaluator};
use crate::layout::{CellHit, HitTester, ScrollState, SizeModel};
use crate::render::{self, DrawSurface, RenderParams};
use crate::styles::{EffectiveStyle, StyleRegistry};
use crate::types::{Axis, Cell, CellMap, GridData, ScrollOffset, ScrollUpdate, Style};

/// Spreadsheet grid engine over a drawing surface `S`
pub struct GridEngine<S: DrawSurface, E: TextEvaluator = FormulaEvaluator> {
    config: GridConfig,
    sizes: SizeModel,
    scroll: ScrollState,
    styles: StyleRegistry,
    cells: CellStore,
    formulas: FormulaTable,
    evaluator: E,
    surface: S,
}

impl<S: DrawSurface> GridEngine<S> {
    /// Create an engine with the default formula evaluator.
    ///
    /// Nothing is drawn until the first [`render`](Self::render) or mutation.
    pub fn new(surface: S, config: GridConfig) -> Result<Self> {
        Self::with_evaluator(surface, config, FormulaEvaluator)
    }
}

impl<S: DrawSurface, E: TextEvaluator> GridEngine<S, E> {
    /// Create an engine with a custom text evaluator
    pub fn with_evaluator(surface: S, config: GridConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        debug!(
            rows = config.rows.length,
            cols = config.cols.length,
            "creating grid engine"
        );
        Ok(Self {
            sizes: SizeModel::new(config.rows, config.cols),
            scroll: ScrollState::new(),
            styles: StyleRegistry::new(config.default_style.clone()),
            cells: CellStore::new(),
            formulas: FormulaTable::default(),
            evaluator,
            surface,
            config,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sizes(&self) -> &SizeModel {
        &self.sizes
    }

    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to resize it. Does not re-render.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn formulas_mut(&mut self) -> &mut FormulaTable {
        &mut self.formulas
    }

    // ------------------------------------------------------------------
    // Data load/export
    // ------------------------------------------------------------------

    /// Load a data bundle. Only the parts present in `data` are replaced.
    ///
    /// The bundle is applied to copies of the size, style and cell tables and
    /// every cell with text is resolved against them. The engine only takes
    /// the new tables once all of that succeeds.
    pub fn load(&mut self, data: GridData) -> Result<()> {
        debug!(
            rows = data.rows.as_ref().map(|m| m.len()),
            cols = data.cols.as_ref().map(|m| m.len()),
            cell_rows = data.cells.as_ref().map(|m| m.len()),
            styles = data.styles.as_ref().map(Vec::len),
            borders = data.borders.as_ref().map(Vec::len),
            "loading grid data"
        );

        let mut sizes = self.sizes.clone();
        if let Some(rows) = data.rows {
            sizes.replace_overrides(Axis::Rows, rows)?;
        }
        if let Some(cols) = data.cols {
            sizes.replace_overrides(Axis::Columns, cols)?;
        }

        let cells = match data.cells {
            Some(map) => {
                Self::validate_cells(&sizes, &map)?;
                Some(CellStore::from_map(map))
            }
            None => None,
        };

        let mut styles = self.styles.clone();
        if let Some(table) = data.styles {
            styles.set_styles(table);
        }
        if let Some(table) = data.borders {
            styles.set_borders(table);
        }
        styles.validate_cells(cells.as_ref().unwrap_or(&self.cells))?;

        self.sizes = sizes;
        self.styles = styles;
        if let Some(cells) = cells {
            self.cells = cells;
        }
        self.render()
    }

    /// Parse and load a JSON bundle
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.load(GridData::from_json(json)?)
    }

    /// Snapshot every part of the current dataset
    pub fn export(&self) -> GridData {
        GridData {
            rows: Some(self.sizes.overrides(Axis::Rows).clone()),
            cols: Some(self.sizes.overrides(Axis::Columns).clone()),
            cells: Some(self.cells.as_map().clone()),
            styles: Some(self.styles.styles().to_vec()),
            borders: Some(self.styles.borders().to_vec()),
        }
    }

    fn validate_cells(sizes: &SizeModel, cells: &CellMap) -> Result<()> {
        for (&row, cols) in cells {
            Self::check_len(sizes, Axis::Rows, row)?;
            for &col in cols.keys() {
                Self::check_len(sizes, Axis::Columns, col)?;
            }
        }
        Ok(())
    }

    fn check_index(&self, axis: Axis, index: u32) -> Result<()> {
        Self::check_len(&self.sizes, axis, index)
    }

    fn check_len(sizes: &SizeModel, axis: Axis, index: u32) -> Result<()> {
        let len = sizes.len(axis);
        if index >= len {
            return Err(XlgridError::IndexOutOfRange { axis, index, len });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Override one row's height and re-render
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.sizes.set_size(Axis::Rows, row, height)?;
        debug!(row, height, "row height set");
        self.render()
    }

    /// Override one column's width and re-render
    pub fn set_col_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.sizes.set_size(Axis::Columns, col, width)?;
        debug!(col, width, "column width set");
        self.render()
    }

    /// Return a row or column to its axis default and re-render
    pub fn reset_size(&mut self, axis: Axis, index: u32) -> Result<()> {
        if self.sizes.clear_size(axis, index).is_some() {
            debug!(%axis, index, "size override cleared");
            self.render()?;
        }
        Ok(())
    }

    /// Merge the provided scroll axes and re-render if the offset changed
    pub fn scroll(&mut self, update: ScrollUpdate) -> Result<()> {
        if self.scroll.set_offset(update) {
            let offset = self.scroll.offset();
            debug!(x = offset.x, y = offset.y, "scrolled");
            self.render()?;
        }
        Ok(())
    }

    /// Insert or replace a cell and re-render.
    ///
    /// Rejects out-of-range positions and dangling style indices without
    /// modifying the store. Returns the replaced cell, if any.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) -> Result<Option<Cell>> {
        self.check_index(Axis::Rows, row)?;
        self.check_index(Axis::Columns, col)?;
        self.styles.resolve(cell.style_index)?;

        let previous = self.cells.set(row, col, cell);
        debug!(row, col, replaced = previous.is_some(), "cell set");
        self.render()?;
        Ok(previous)
    }

    /// Remove a cell and re-render if one was present
    pub fn remove_cell(&mut self, row: u32, col: u32) -> Result<Option<Cell>> {
        let removed = self.cells.remove(row, col);
        if removed.is_some() {
            debug!(row, col, "cell removed");
            self.render()?;
        }
        Ok(removed)
    }

    /// Replace the table-wide default style and re-render.
    ///
    /// Rejects a default whose border indices dangle while any unstyled cell
    /// with text would pick them up.
    pub fn set_default_style(&mut self, style: Style) -> Result<()> {
        let mut styles = self.styles.clone();
        styles.set_default_style(style);
        styles.validate_cells(&self.cells)?;

        self.styles = styles;
        debug!("default style replaced");
        self.render()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Hit tester for the current scroll offset
    pub fn hit_tester(&self) -> HitTester<'_> {
        HitTester::new(
            &self.sizes,
            self.scroll.offset(),
            self.config.header.row_header_width,
            self.config.header.col_header_height,
        )
    }

    /// Locate the cell under a surface pixel position
    pub fn locate(&self, x: f64, y: f64) -> CellHit {
        self.hit_tester().locate(x, y)
    }

    /// Total content width (all columns)
    pub fn total_width(&self) -> f64 {
        self.sizes.total_extent(Axis::Columns)
    }

    /// Total content height (all rows)
    pub fn total_height(&self) -> f64 {
        self.sizes.total_extent(Axis::Rows)
    }

    /// Resolve a style index against the current tables
    pub fn resolve(&self, style_index: Option<usize>) -> Result<EffectiveStyle> {
        self.styles.resolve(style_index)
    }

    /// Display text of a cell after evaluation
    pub fn display_text(&self, row: u32, col: u32) -> String {
        let cells = &self.cells;
        let lookup = |r: u32, c: u32| cells.text(r, c).to_string();
        self.evaluator
            .evaluate(cells.text(row, col), &self.formulas, &lookup)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Redraw the whole grid onto the surface
    pub fn render(&mut self) -> Result<()> {
        let params = RenderParams {
            sizes: &self.sizes,
            scroll: self.scroll.offset(),
            styles: &self.styles,
            cells: &self.cells,
            config: &self.config,
            formulas: &self.formulas,
            evaluator: &self.evaluator,
        };
        render::render(&mut self.surface, &params).map_err(|e| {
            warn!(error = %e, "render aborted");
            e
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::types::AxisSpec;

    fn engine() -> GridEngine<RecordingSurface> {
        let config = GridConfig::with_axes(AxisSpec::new(10, 25.0), AxisSpec::new(5, 100.0));
        GridEngine::new(RecordingSurface::default(), config).unwrap()
    }

    #[test]
    fn test_new_does_not_draw() {
        let engine = engine();
        assert!(engine.surface().commands().is_empty());
    }

    #[test]
    fn test_mutation_rerenders() {
        let mut engine = engine();
        engine.set_row_height(1, 50.0).unwrap();
        assert_eq!(engine.surface().commands().first(), Some(&DrawCommand::Clear));
        assert_eq!(engine.total_height(), 275.0);
    }

    #[test]
    fn test_invalid_size_leaves_state() {
        let mut engine = engine();
        let err = engine.set_col_width(0, -1.0).unwrap_err();
        assert!(matches!(err, XlgridError::InvalidSize { .. }));
        assert!(engine.sizes().overrides(Axis::Columns).is_empty());
        assert!(engine.surface().commands().is_empty());
    }

    #[test]
    fn test_set_cell_rejects_dangling_style() {
        let mut engine = engine();
        engine
            .load(GridData {
                styles: Some(vec![Style::default()]),
                ..GridData::default()
            })
            .unwrap();
        let err = engine.set_cell(0, 0, Cell::styled("x", 4)).unwrap_err();
        assert!(matches!(err, XlgridError::StyleIndex { index: 4, len: 1 }));
        assert!(engine.cells().is_empty());
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut engine = engine();
        let err = engine.set_cell(0, 5, Cell::new("x")).unwrap_err();
        assert!(matches!(
            err,
            XlgridError::IndexOutOfRange {
                axis: Axis::Columns,
                index: 5,
                len: 5
            }
        ));
    }

    #[test]
    fn test_partial_load_keeps_other_parts() {
        let mut engine = engine();
        engine.set_cell(2, 2, Cell::new("keep")).unwrap();
        engine.load_json(r#"{"rows":{"3":{"size":40}}}"#).unwrap();
        assert_eq!(engine.cells().text(2, 2), "keep");
        assert_eq!(engine.sizes().size_of(Axis::Rows, 3), 40.0);
    }

    #[test]
    fn test_load_validates_before_applying() {
        let mut engine = engine();
        let err = engine
            .load_json(r#"{"rows":{"1":{"size":40}},"cols":{"9":{"size":10}}}"#)
            .unwrap_err();
        assert!(matches!(err, XlgridError::IndexOutOfRange { .. }));
        assert!(engine.sizes().overrides(Axis::Rows).is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut engine = engine();
        engine
            .load_json(r##"{"cells":{"0":{"0":{"text":"a"}}},"styles":[{"bgcolor":"#fff"}]}"##)
            .unwrap();
        let before = engine.export();

        let err = engine
            .load_json(r#"{"rows":{"2":{"size":60}},"cells":{"0":{"0":{"text":"x","si":9}}}}"#)
            .unwrap_err();
        assert!(matches!(err, XlgridError::StyleIndex { index: 9, len: 1 }));
        assert_eq!(engine.export(), before);

        engine.set_cell(1, 1, Cell::new("ok")).unwrap();
        assert_eq!(engine.cells().len(), 2);
    }

    #[test]
    fn test_styles_only_load_checks_existing_cells() {
        let mut engine = engine();
        engine.load_json(r#"{"styles":[{},{}]}"#).unwrap();
        engine.set_cell(0, 0, Cell::styled("x", 1)).unwrap();

        let err = engine.load_json(r#"{"styles":[{}]}"#).unwrap_err();
        assert!(matches!(err, XlgridError::StyleIndex { index: 1, len: 1 }));
        assert_eq!(engine.styles().styles().len(), 2);
    }

    #[test]
    fn test_default_style_with_dangling_border_is_rejected() {
        let mut engine = engine();
        engine.set_cell(0, 0, Cell::new("x")).unwrap();
        let err = engine
            .set_default_style(Style {
                border_top_index: Some(3),
                ..Style::default()
            })
            .unwrap_err();
        assert!(matches!(err, XlgridError::BorderIndex { index: 3, len: 0 }));
        assert!(engine.styles().default_style().border_top_index.is_none());
    }

    #[test]
    fn test_scroll_without_change_does_not_render() {
        let mut engine = engine();
        engine.scroll(ScrollUpdate::x(0.0)).unwrap();
        assert!(engine.surface().commands().is_empty());
        engine.scroll(ScrollUpdate::y(-30.0)).unwrap();
        assert_eq!(engine.scroll_offset(), ScrollOffset { x: 0.0, y: -30.0 });
        assert!(!engine.surface().commands().is_empty());
    }

    #[test]
    fn test_display_text_reads_target_cell() {
        let mut engine = engine();
        engine.set_cell(0, 0, Cell::new("41")).unwrap();
        engine.set_cell(1, 0, Cell::new("=A1")).unwrap();
        assert_eq!(engine.display_text(1, 0), "41");
    }
}
