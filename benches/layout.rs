//! Benchmarks for grid geometry, hit testing and rendering.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xlgrid::config::GridConfig;
use xlgrid::engine::GridEngine;
use xlgrid::layout::SizeModel;
use xlgrid::render::RecordingSurface;
use xlgrid::types::{Axis, AxisSpec, Cell, CellMap, GridData};

/// Size model with every tenth row and column overridden
fn sparse_model(rows: u32, cols: u32) -> SizeModel {
    let mut sizes = SizeModel::new(AxisSpec::new(rows, 25.0), AxisSpec::new(cols, 100.0));
    for i in (0..rows).step_by(10) {
        sizes
            .set_size(Axis::Rows, i, 40.0)
            .expect("override in range");
    }
    for i in (0..cols).step_by(10) {
        sizes
            .set_size(Axis::Columns, i, 150.0)
            .expect("override in range");
    }
    sizes
}

/// Benchmark total extent (closed form) versus a full cumulative walk
fn bench_extent(c: &mut Criterion) {
    let mut group = c.benchmark_group("extent");
    for rows in [1_000u32, 100_000] {
        let sizes = sparse_model(rows, 26);
        group.bench_with_input(BenchmarkId::new("total_extent", rows), &sizes, |b, s| {
            b.iter(|| s.total_extent(black_box(Axis::Rows)))
        });
        group.bench_with_input(BenchmarkId::new("cumulative_walk", rows), &sizes, |b, s| {
            b.iter(|| s.cumulative_before(Axis::Rows, black_box(rows)))
        });
    }
    group.finish();
}

/// Benchmark hit testing at the far end of a large sheet
fn bench_locate(c: &mut Criterion) {
    let config = GridConfig::with_axes(AxisSpec::new(10_000, 25.0), AxisSpec::new(100, 100.0));
    let engine =
        GridEngine::new(RecordingSurface::default(), config).expect("Failed to create grid");
    let far_y = engine.total_height();
    let far_x = engine.total_width();

    c.bench_function("locate_far_corner", |b| {
        b.iter(|| engine.locate(black_box(far_x), black_box(far_y)))
    });
}

/// Benchmark a full frame with a block of populated cells
fn bench_render(c: &mut Criterion) {
    let config = GridConfig::with_axes(AxisSpec::new(200, 25.0), AxisSpec::new(26, 100.0));
    let mut engine =
        GridEngine::new(RecordingSurface::default(), config).expect("Failed to create grid");

    let mut cells = CellMap::new();
    for row in 0..100u32 {
        let cols = cells.entry(row).or_default();
        for col in 0..10u32 {
            let text = if col == 9 {
                format!("=SUM(A{}:I{})", row + 1, row + 1)
            } else {
                (row * col).to_string()
            };
            cols.insert(col, Cell::new(text));
        }
    }
    engine
        .load(GridData {
            cells: Some(cells),
            ..GridData::default()
        })
        .expect("Failed to load");

    c.bench_function("render_100x10", |b| {
        b.iter(|| engine.render().expect("Failed to render"))
    });
}

criterion_group!(benches, bench_extent, bench_locate, bench_render);

criterion_main!(benches);
