//! Common test utilities for driving a grid engine headlessly.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use xlgrid::config::GridConfig;
use xlgrid::engine::GridEngine;
use xlgrid::render::{DrawBox, DrawCommand, RecordingSurface};
use xlgrid::types::AxisSpec;

/// Engine with `rows`×`cols` cells of 25×100 px and default headers (60×25)
pub fn engine(rows: u32, cols: u32) -> GridEngine<RecordingSurface> {
    let config = GridConfig::with_axes(AxisSpec::new(rows, 25.0), AxisSpec::new(cols, 100.0));
    GridEngine::new(RecordingSurface::new(800.0, 600.0), config).expect("valid config")
}

/// Engine loaded from a JSON bundle
pub fn engine_with(rows: u32, cols: u32, json: &str) -> GridEngine<RecordingSurface> {
    let mut engine = engine(rows, cols);
    engine.load_json(json).expect("bundle loads");
    engine
}

/// Every `DrawBox` in the frame, paired with the translation active when it
/// was drawn
pub fn boxes_with_offset(commands: &[DrawCommand]) -> Vec<(DrawBox, (f64, f64))> {
    let mut stack: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    let mut out = Vec::new();
    for cmd in commands {
        match cmd {
            DrawCommand::Save => {
                let top = *stack.last().unwrap();
                stack.push(top);
            }
            DrawCommand::Restore => {
                stack.pop();
            }
            DrawCommand::Translate { dx, dy } => {
                let top = stack.last_mut().unwrap();
                top.0 += dx;
                top.1 += dy;
            }
            DrawCommand::DrawBox(dbox) => out.push((dbox.clone(), *stack.last().unwrap())),
            _ => {}
        }
    }
    out
}

/// Text of every `FillText` in the frame
pub fn labels(commands: &[DrawCommand]) -> Vec<(String, f64, f64)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect()
}

/// All wrapped text lines drawn into cells, in order
pub fn cell_text(commands: &[DrawCommand]) -> Vec<Vec<String>> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText { lines, .. } => Some(lines.clone()),
            _ => None,
        })
        .collect()
}
