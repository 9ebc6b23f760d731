//! Rendering pipeline tests
//!
//! Frames are rendered into a `RecordingSurface` and checked command by
//! command: step order, grid lines, header labels, cell boxes and text.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use xlgrid::render::{DrawAttrs, DrawCommand};
use xlgrid::types::{
    Border, BorderLineStyle, Cell, GridData, HAlign, ScrollUpdate, Style, TextDecoration,
};
use xlgrid::XlgridError;

// ============================================================================
// Frame structure
// ============================================================================

#[test]
fn test_content_grid_draws_boundary_lines() {
    let mut engine = common::engine(3, 3);
    engine.render().unwrap();
    let frame = engine.surface().last_frame();

    assert_eq!(frame[0], DrawCommand::Clear);
    assert_eq!(frame[1], DrawCommand::Save);
    assert_eq!(frame[2], DrawCommand::Translate { dx: 60.0, dy: 25.0 });
    assert_eq!(frame[3], DrawCommand::Translate { dx: 0.0, dy: 0.0 });
    assert_eq!(frame[4], DrawCommand::SetAttrs(DrawAttrs::stroke(0.5, "#d0d0d0")));

    // length + 1 lines per axis
    let lines: Vec<&DrawCommand> = frame[5..13].iter().collect();
    assert_eq!(
        lines[0],
        &DrawCommand::Line {
            from: (0.0, 0.0),
            to: (300.0, 0.0)
        }
    );
    assert_eq!(
        lines[3],
        &DrawCommand::Line {
            from: (0.0, 75.0),
            to: (300.0, 75.0)
        }
    );
    assert_eq!(
        lines[7],
        &DrawCommand::Line {
            from: (300.0, 0.0),
            to: (300.0, 75.0)
        }
    );
    assert_eq!(frame[13], DrawCommand::Restore);
}

#[test]
fn test_save_restore_balanced() {
    let mut engine = common::engine_with(5, 5, r#"{"cells":{"1":{"1":{"text":"a"}}}}"#);
    engine.scroll(ScrollUpdate::both(-20.0, -10.0)).unwrap();
    let frame = engine.surface().last_frame();
    let mut depth = 0i32;
    for cmd in frame {
        match cmd {
            DrawCommand::Save => depth += 1,
            DrawCommand::Restore => {
                depth -= 1;
                assert!(depth >= 0);
            }
            DrawCommand::Translate { .. } => assert!(depth > 0, "translate outside a step"),
            _ => {}
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_render_is_idempotent() {
    let mut engine = common::engine_with(
        10,
        5,
        r##"{"cells":{"0":{"0":{"text":"1"},"1":{"text":"=A1"}},"4":{"2":{"text":"x","si":0}}},
            "styles":[{"bgcolor":"#eee","bti":0}],"borders":[[1,"solid","#000"]]}"##,
    );
    engine.render().unwrap();
    let first = engine.surface().commands().to_vec();
    engine.render().unwrap();
    assert_eq!(engine.surface().commands(), first.as_slice());
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_header_labels() {
    let mut engine = common::engine(3, 28);
    engine.render().unwrap();
    let labels = common::labels(engine.surface().last_frame());

    assert_eq!(labels[0], ("1".to_string(), 30.0, 37.5));
    assert_eq!(labels[2], ("3".to_string(), 30.0, 87.5));
    assert_eq!(labels[3], ("A".to_string(), 110.0, 12.5));
    assert_eq!(labels[4], ("B".to_string(), 210.0, 12.5));
    let last = labels.last().unwrap();
    assert_eq!(last.0, "AB");
    // Boundary indices never get a label
    assert_eq!(labels.len(), 3 + 28);
}

#[test]
fn test_headers_follow_scroll_on_their_own_axis() {
    let mut engine = common::engine(3, 3);
    engine.scroll(ScrollUpdate::both(-100.0, -25.0)).unwrap();
    let labels = common::labels(engine.surface().last_frame());

    // Row labels move vertically only
    assert_eq!(labels[0], ("1".to_string(), 30.0, 12.5));
    // Column labels move horizontally only
    assert_eq!(labels[3], ("A".to_string(), 10.0, 12.5));
}

#[test]
fn test_corner_painted_after_labels() {
    let mut engine = common::engine(3, 3);
    engine.render().unwrap();
    let frame = engine.surface().last_frame();
    let last_label = frame
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillText { .. }))
        .unwrap();
    let corner = frame
        .iter()
        .rposition(|c| {
            *c == DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 60.0,
                height: 25.0,
            }
        })
        .unwrap();
    assert!(corner > last_label);
}

#[test]
fn test_header_bands_cover_surface() {
    let mut engine = common::engine(3, 3);
    engine.render().unwrap();
    let frame = engine.surface().last_frame();
    // 800×600 surface is larger than the 300×75 content
    assert!(frame.contains(&DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: 60.0,
        height: 600.0
    }));
    assert!(frame.contains(&DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 25.0
    }));
}

// ============================================================================
// Cells
// ============================================================================

#[test]
fn test_cell_box_geometry_and_style() {
    let mut engine = common::engine(5, 5);
    engine.set_row_height(1, 40.0).unwrap();
    engine
        .load(GridData {
            styles: Some(vec![Style {
                background_color: Some("#ffeeaa".into()),
                border_default_index: Some(0),
                ..Style::default()
            }]),
            borders: Some(vec![Border::new(2.0, BorderLineStyle::Dashed, "#f00")]),
            ..GridData::default()
        })
        .unwrap();
    engine.set_cell(2, 1, Cell::styled("hi", 0)).unwrap();

    let boxes = common::boxes_with_offset(engine.surface().last_frame());
    assert_eq!(boxes.len(), 1);
    let (dbox, offset) = &boxes[0];
    assert_eq!((dbox.x, dbox.y, dbox.width, dbox.height), (100.0, 65.0, 100.0, 25.0));
    assert_eq!(dbox.padding, 5.0);
    assert_eq!(*offset, (60.0, 25.0));
    assert_eq!(dbox.background_color.as_deref(), Some("#ffeeaa"));
    assert_eq!(dbox.borders.left().unwrap().style, BorderLineStyle::Dashed);
    assert_eq!(dbox.borders.top().unwrap().width, 2.0);
}

#[test]
fn test_formula_reads_referenced_cell() {
    let engine = common::engine_with(
        5,
        5,
        r#"{"cells":{"0":{"0":{"text":"2"}},"1":{"0":{"text":"3"}},"2":{"0":{"text":"=SUM(A1:A2)"}},"3":{"0":{"text":"=A2"}}}}"#,
    );
    let texts = common::cell_text(engine.surface().last_frame());
    assert_eq!(texts, vec![vec!["2"], vec!["3"], vec!["5"], vec!["3"]]);
}

#[test]
fn test_empty_text_draws_box_only() {
    let mut engine = common::engine(3, 3);
    engine.set_cell(0, 0, Cell::new("")).unwrap();
    let frame = engine.surface().last_frame();
    assert_eq!(common::boxes_with_offset(frame).len(), 1);
    assert!(common::cell_text(frame).is_empty());
}

#[test]
fn test_text_attributes_follow_resolved_style() {
    let mut engine = common::engine(3, 3);
    engine
        .load(GridData {
            styles: Some(vec![Style {
                horizontal_align: Some(HAlign::Right),
                wrap_text: Some(true),
                text_decoration: Some(TextDecoration::Underline),
                ..Style::default()
            }]),
            ..GridData::default()
        })
        .unwrap();
    // 90px inner width at 8.4px per char wraps after 10 chars
    engine
        .set_cell(0, 0, Cell::styled("alpha beta gamma", 0))
        .unwrap();

    let frame = engine.surface().last_frame();
    let text = frame
        .iter()
        .find_map(|c| match c {
            DrawCommand::DrawText {
                lines, x, attrs, ..
            } => Some((lines.clone(), *x, attrs.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(text.0, vec!["alpha beta", "gamma"]);
    assert_eq!(text.1, 95.0);
    assert_eq!(text.2.align, HAlign::Right);
    assert_eq!(text.2.decoration, TextDecoration::Underline);
    assert_eq!(text.2.font.family, "Arial");
}

// ============================================================================
// Data integrity
// ============================================================================

#[test]
fn test_dangling_style_aborts_without_drawing() {
    let mut engine = common::engine_with(
        3,
        3,
        r##"{"cells":{"0":{"0":{"text":"ok"}}},"styles":[{"bgcolor":"#fff"}]}"##,
    );
    let before = engine.surface().commands().to_vec();

    let err = engine
        .load_json(r#"{"cells":{"1":{"1":{"text":"bad","si":3}}}}"#)
        .unwrap_err();
    assert!(matches!(err, XlgridError::StyleIndex { index: 3, len: 1 }));
    assert_eq!(engine.surface().commands(), before.as_slice());
}

#[test]
fn test_dangling_border_aborts() {
    let mut engine = common::engine(3, 3);
    let err = engine
        .load_json(r#"{"cells":{"0":{"0":{"text":"x","si":0}}},"styles":[{"bli":2}],"borders":[]}"#)
        .unwrap_err();
    assert!(matches!(err, XlgridError::BorderIndex { index: 2, len: 0 }));
    assert!(engine.surface().commands().is_empty());
}

#[test]
fn test_blank_cell_with_dangling_style_is_skipped() {
    let mut engine = common::engine_with(
        3,
        3,
        r##"{"cells":{"0":{"0":{"text":"ok"},"1":{"text":"","si":7}}},"styles":[{"bgcolor":"#fff"}]}"##,
    );
    let frame = engine.surface().last_frame();
    assert_eq!(common::boxes_with_offset(frame).len(), 1);
    assert_eq!(common::cell_text(frame), vec![vec!["ok".to_string()]]);
}

#[test]
fn test_default_border_not_drawn_on_styled_cells() {
    let mut engine = common::engine(3, 3);
    engine
        .load(GridData {
            borders: Some(vec![Border::new(1.0, BorderLineStyle::Solid, "#f00")]),
            styles: Some(vec![Style {
                background_color: Some("#eee".into()),
                ..Style::default()
            }]),
            ..GridData::default()
        })
        .unwrap();
    engine
        .set_default_style(Style {
            border_top_index: Some(0),
            ..xlgrid::styles::builtin_style()
        })
        .unwrap();
    engine.set_cell(0, 0, Cell::styled("styled", 0)).unwrap();
    engine.set_cell(1, 1, Cell::new("plain")).unwrap();

    let boxes = common::boxes_with_offset(engine.surface().last_frame());
    assert_eq!(boxes.len(), 2);
    assert!(boxes[0].0.borders.top().is_none());
    assert_eq!(boxes[1].0.borders.top().unwrap().color, "#f00");
}
