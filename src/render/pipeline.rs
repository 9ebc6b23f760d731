//! Frame composition: clear, content grid, fixed headers, cell contents.
//!
//! Each step saves the surface state, applies its own translation and
//! restores afterwards, so no step inherits another's transform.

use tracing::trace_span;

use crate::cells::CellStore;
use crate::config::GridConfig;
use crate::error::Result;
use crate::formula::{FormulaTable, TextEvaluator};
use crate::layout::SizeModel;
use crate::render::headers::render_fixed_headers;
use crate::render::surface::{DrawAttrs, DrawBox, DrawSurface, TextAttrs};
use crate::styles::{EffectiveStyle, StyleRegistry};
use crate::types::{Axis, Cell, ScrollOffset};

/// Render parameters: a borrowed view of engine state for one frame
pub struct RenderParams<'a, E: TextEvaluator + ?Sized> {
    pub sizes: &'a SizeModel,
    pub scroll: ScrollOffset,
    pub styles: &'a StyleRegistry,
    pub cells: &'a CellStore,
    pub config: &'a GridConfig,
    pub formulas: &'a FormulaTable,
    pub evaluator: &'a E,
}

/// A populated cell with its style already resolved
struct PreparedCell<'a> {
    row: u32,
    col: u32,
    cell: &'a Cell,
    style: EffectiveStyle,
}

/// Produce a complete frame.
///
/// Every populated cell's style is resolved before the surface is touched, so
/// a dangling style or border index on a cell with text aborts the frame
/// without drawing anything. Blank cells whose style does not resolve are
/// left undrawn.
pub fn render<S, E>(surface: &mut S, params: &RenderParams<'_, E>) -> Result<()>
where
    S: DrawSurface + ?Sized,
    E: TextEvaluator + ?Sized,
{
    let prepared = prepare_cells(params)?;

    surface.clear();
    render_content_grid(surface, params);
    {
        let _span = trace_span!("render_fixed_headers").entered();
        render_fixed_headers(surface, params.sizes, params.scroll, &params.config.header);
    }
    render_cells(surface, params, &prepared);
    Ok(())
}

fn prepare_cells<'a, E: TextEvaluator + ?Sized>(
    params: &RenderParams<'a, E>,
) -> Result<Vec<PreparedCell<'a>>> {
    params
        .cells
        .iter()
        .filter_map(|(row, col, cell)| {
            let style = match params.styles.resolve(cell.style_index) {
                Ok(style) => style,
                // A blank cell only needs a style for its box; skip it instead
                // of failing the frame.
                Err(_) if cell.text.is_empty() => return None,
                Err(e) => return Some(Err(e)),
            };
            Some(Ok(PreparedCell {
                row,
                col,
                cell,
                style,
            }))
        })
        .collect()
}

/// Cell box in content coordinates (before header offset and scroll)
pub fn draw_box(sizes: &SizeModel, padding: f64, row: u32, col: u32) -> DrawBox {
    let rect = sizes.cell_rect(row, col);
    DrawBox::new(rect.x, rect.y, rect.width, rect.height, padding)
}

/// Push state and translate into scrolled content space
fn enter_content<S: DrawSurface + ?Sized, E: TextEvaluator + ?Sized>(
    surface: &mut S,
    params: &RenderParams<'_, E>,
) {
    surface.save();
    surface.translate(
        params.config.header.row_header_width,
        params.config.header.col_header_height,
    );
    surface.translate(params.scroll.x, params.scroll.y);
}

fn render_content_grid<S: DrawSurface + ?Sized, E: TextEvaluator + ?Sized>(
    surface: &mut S,
    params: &RenderParams<'_, E>,
) {
    let _span = trace_span!("render_content_grid").entered();
    let sizes = params.sizes;
    let total_width = sizes.total_extent(Axis::Columns);
    let total_height = sizes.total_extent(Axis::Rows);

    enter_content(surface, params);
    surface.set_attrs(&DrawAttrs::stroke(
        params.config.grid_line_width,
        &params.config.grid_line_color,
    ));
    for (_, y, _) in sizes.walk(Axis::Rows, sizes.len(Axis::Rows)) {
        surface.line((0.0, y), (total_width, y));
    }
    for (_, x, _) in sizes.walk(Axis::Columns, sizes.len(Axis::Columns)) {
        surface.line((x, 0.0), (x, total_height));
    }
    surface.restore();
}

fn render_cells<S: DrawSurface + ?Sized, E: TextEvaluator + ?Sized>(
    surface: &mut S,
    params: &RenderParams<'_, E>,
    prepared: &[PreparedCell<'_>],
) {
    let _span = trace_span!("render_cells", count = prepared.len()).entered();
    let cells = params.cells;
    let lookup = |row: u32, col: u32| cells.text(row, col).to_string();

    for p in prepared {
        let mut dbox = draw_box(params.sizes, params.config.cell_padding, p.row, p.col);
        dbox.background_color = Some(p.style.background_color.clone());
        dbox.borders = p.style.borders.clone();

        enter_content(surface, params);
        surface.draw_box(&dbox);

        let text = params
            .evaluator
            .evaluate(&p.cell.text, params.formulas, &lookup);
        if !text.is_empty() {
            let attrs = TextAttrs {
                align: p.style.horizontal_align,
                valign: p.style.vertical_align,
                font: p.style.font.clone(),
                color: p.style.text_color.clone(),
                decoration: p.style.text_decoration,
            };
            surface.draw_text(&text, &dbox, &attrs, p.style.wrap_text);
        }
        surface.restore();
    }
}
