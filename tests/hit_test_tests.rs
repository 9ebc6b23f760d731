//! Hit testing tests
//!
//! Verifies that `locate` agrees with the geometry the render pipeline draws,
//! for zero, positive and negative scroll offsets.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use test_case::test_case;
use xlgrid::layout::CellRect;
use xlgrid::types::{Cell, ScrollUpdate};

const HEADER_WIDTH: f64 = 60.0;
const HEADER_HEIGHT: f64 = 25.0;

#[test_case(0.0, 0.0 ; "no scroll")]
#[test_case(-130.0, -40.0 ; "negative scroll")]
#[test_case(35.0, 12.5 ; "positive scroll")]
#[test_case(-1000.0, 0.0 ; "scrolled far left")]
fn test_locate_matches_rendered_boxes(scroll_x: f64, scroll_y: f64) {
    let mut engine = common::engine_with(
        6,
        4,
        r#"{"rows":{"2":{"size":50},"4":{"size":0}},"cols":{"1":{"size":40}}}"#,
    );
    for (row, col) in [(0, 0), (1, 1), (2, 1), (3, 3), (5, 2)] {
        engine.set_cell(row, col, Cell::new("x")).unwrap();
    }
    engine.scroll(ScrollUpdate::both(scroll_x, scroll_y)).unwrap();

    let boxes = common::boxes_with_offset(engine.surface().last_frame());
    assert_eq!(boxes.len(), 5);

    for (dbox, (dx, dy)) in boxes {
        // Where the box lands on the surface
        let left = dbox.x + dx;
        let top = dbox.y + dy;
        let hit = engine.locate(left + dbox.width / 2.0, top + dbox.height / 2.0);

        // Same rectangle, scroll removed
        let expected = CellRect {
            x: left - scroll_x,
            y: top - scroll_y,
            width: dbox.width,
            height: dbox.height,
        };
        assert_eq!(hit.rect, expected);
        assert_eq!(hit.rect, engine.hit_tester().sheet_rect(hit.row, hit.col));
        assert!(engine.cells().get(hit.row, hit.col).is_some());
    }
}

#[test]
fn test_boundary_goes_to_following_column() {
    let engine = common::engine(3, 3);
    // Right edge of column 0
    let hit = engine.locate(HEADER_WIDTH + 100.0, HEADER_HEIGHT + 1.0);
    assert_eq!((hit.row, hit.col), (0, 1));
    // Bottom edge of row 0
    let hit = engine.locate(HEADER_WIDTH + 1.0, HEADER_HEIGHT + 25.0);
    assert_eq!((hit.row, hit.col), (1, 0));
}

#[test]
fn test_point_past_content_reports_axis_length() {
    let engine = common::engine(3, 3);
    let hit = engine.locate(HEADER_WIDTH + 300.0, HEADER_HEIGHT + 75.0);
    assert_eq!((hit.row, hit.col), (3, 3));
    assert!(!hit.is_content(engine.sizes()));
    assert_eq!(
        hit.rect,
        CellRect {
            x: HEADER_WIDTH + 300.0,
            y: HEADER_HEIGHT + 75.0,
            width: 100.0,
            height: 25.0,
        }
    );
}

#[test]
fn test_point_over_headers_clamps_to_first_cell() {
    let engine = common::engine(3, 3);
    let hit = engine.locate(5.0, 5.0);
    assert_eq!((hit.row, hit.col), (0, 0));
    assert!(hit.is_content(engine.sizes()));
}

#[test]
fn test_hidden_row_is_skipped() {
    let mut engine = common::engine(3, 3);
    engine.set_row_height(1, 0.0).unwrap();
    // Exactly where row 1 would start: row 1 has no height, so row 2 wins
    let hit = engine.locate(HEADER_WIDTH + 1.0, HEADER_HEIGHT + 25.0);
    assert_eq!(hit.row, 2);
}

#[test]
fn test_scroll_is_partial_merge() {
    let mut engine = common::engine(10, 10);
    engine.scroll(ScrollUpdate::both(-100.0, -50.0)).unwrap();
    engine.scroll(ScrollUpdate::y(-25.0)).unwrap();
    let offset = engine.scroll_offset();
    assert_eq!((offset.x, offset.y), (-100.0, -25.0));
    let hit = engine.locate(HEADER_WIDTH + 1.0, HEADER_HEIGHT + 1.0);
    assert_eq!((hit.row, hit.col), (1, 1));
}
