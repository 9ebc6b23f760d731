//! Fixed row and column header rendering.
//!
//! - Column headers: A, B, C, ... Z, AA, AB, ...
//! - Row headers: 1, 2, 3, ...
//!
//! The row-number column follows vertical scroll only, the column-letter row
//! follows horizontal scroll only, and the corner cell never moves. Each
//! strip paints an opaque band before its labels so content and the other
//! strip's labels never bleed through.

use crate::cell_ref::col_to_letter;
use crate::config::HeaderConfig;
use crate::layout::SizeModel;
use crate::render::surface::{DrawAttrs, DrawSurface};
use crate::types::{Axis, HAlign, ScrollOffset, VAlign};

/// Render both header strips and the corner cell
pub fn render_fixed_headers<S: DrawSurface + ?Sized>(
    surface: &mut S,
    sizes: &SizeModel,
    scroll: ScrollOffset,
    config: &HeaderConfig,
) {
    let header_width = config.row_header_width;
    let header_height = config.col_header_height;
    let (surface_width, surface_height) = surface.size();
    let band_height = (sizes.total_extent(Axis::Rows) + header_height).max(surface_height);
    let band_width = (sizes.total_extent(Axis::Columns) + header_width).max(surface_width);

    surface.save();

    // Row numbers
    surface.set_attrs(&DrawAttrs::fill(&config.background_color));
    surface.fill_rect(0.0, 0.0, header_width, band_height);
    set_label_attrs(surface, config);
    let row_len = sizes.len(Axis::Rows);
    for (row, y1, row_height) in sizes.walk(Axis::Rows, row_len) {
        let y = y1 + header_height + scroll.y;
        if row != row_len {
            let label = (u64::from(row) + 1).to_string();
            surface.fill_text(&label, header_width / 2.0, y + row_height / 2.0);
        }
        surface.line((0.0, y), (header_width, y));
    }

    // Column letters
    surface.set_attrs(&DrawAttrs::fill(&config.background_color));
    surface.fill_rect(0.0, 0.0, band_width, header_height);
    set_label_attrs(surface, config);
    let col_len = sizes.len(Axis::Columns);
    for (col, x1, col_width) in sizes.walk(Axis::Columns, col_len) {
        let x = x1 + header_width + scroll.x;
        if col != col_len {
            surface.fill_text(&col_to_letter(col), x + col_width / 2.0, header_height / 2.0);
        }
        surface.line((x, 0.0), (x, header_height));
    }

    // Corner cell
    surface.set_attrs(&DrawAttrs::fill(&config.background_color));
    surface.fill_rect(0.0, 0.0, header_width, header_height);

    // Header/content separators
    surface.set_attrs(&DrawAttrs::stroke(config.line_width, &config.line_color));
    surface.line((header_width, 0.0), (header_width, band_height));
    surface.line((0.0, header_height), (band_width, header_height));

    surface.restore();
}

fn set_label_attrs<S: DrawSurface + ?Sized>(surface: &mut S, config: &HeaderConfig) {
    surface.set_attrs(&DrawAttrs {
        line_width: Some(config.line_width),
        stroke_style: Some(config.line_color.clone()),
        fill_style: Some(config.text_color.clone()),
        font: Some(config.font.clone()),
        text_align: Some(HAlign::Center),
        text_baseline: Some(VAlign::Middle),
    });
}
