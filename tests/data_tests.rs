//! Data load/export and style resolution tests
//!
//! Round-trips full bundles between engines and checks style merging and
//! sparse cell storage through the public engine surface.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use xlgrid::types::{Axis, Cell, FontPatch, GridData, Style, VAlign};

const BUNDLE: &str = r##"{
    "rowm": {"1": {"height": 50}, "7": {"size": 0}},
    "colm": {"2": {"width": 180}},
    "cellmm": {
        "0": {"0": {"text": "Name", "si": 0}, "1": {"text": "Qty"}},
        "3": {"2": {"text": "=SUM(B1:B3)", "si": 1}}
    },
    "styles": [
        {"bgcolor": "#fff", "font": {"bold": true}, "bbi": 0},
        {"align": "right", "valign": "bottom", "wrapText": true}
    ],
    "borders": [[1, "solid", "#999999"]]
}"##;

#[test]
fn test_export_load_round_trip() {
    let original = common::engine_with(10, 5, BUNDLE);
    let exported = original.export();

    let mut copy = common::engine(10, 5);
    copy.load(exported.clone()).unwrap();

    for axis in [Axis::Rows, Axis::Columns] {
        for i in 0..original.sizes().len(axis) {
            assert_eq!(original.sizes().size_of(axis, i), copy.sizes().size_of(axis, i));
        }
    }
    for index in [None, Some(0), Some(1)] {
        assert_eq!(original.resolve(index).unwrap(), copy.resolve(index).unwrap());
    }
    for row in 0..10 {
        for col in 0..5 {
            assert_eq!(original.cells().get(row, col), copy.cells().get(row, col));
        }
    }
    assert_eq!(copy.export(), exported);
}

#[test]
fn test_export_json_round_trip() {
    let original = common::engine_with(10, 5, BUNDLE);
    let json = original.export().to_json().unwrap();
    let copy = common::engine_with(10, 5, &json);
    assert_eq!(copy.export(), original.export());
}

#[test]
fn test_export_fills_every_part() {
    let engine = common::engine(3, 3);
    let data = engine.export();
    assert!(data.rows.unwrap().is_empty());
    assert!(data.cols.unwrap().is_empty());
    assert!(data.cells.unwrap().is_empty());
    assert!(data.styles.unwrap().is_empty());
    assert!(data.borders.unwrap().is_empty());
}

#[test]
fn test_short_keys_load() {
    let engine = common::engine_with(10, 5, BUNDLE);
    assert_eq!(engine.sizes().size_of(Axis::Rows, 1), 50.0);
    assert_eq!(engine.sizes().size_of(Axis::Rows, 7), 0.0);
    assert_eq!(engine.sizes().size_of(Axis::Columns, 2), 180.0);
    assert_eq!(engine.cells().text(0, 1), "Qty");

    let style = engine.resolve(Some(1)).unwrap();
    assert_eq!(style.vertical_align, VAlign::Bottom);
    assert!(style.wrap_text);
    let style = engine.resolve(Some(0)).unwrap();
    assert_eq!(style.borders.bottom().unwrap().color, "#999999");
    assert!(style.borders.top().is_none());
}

#[test]
fn test_style_merges_onto_default() {
    let mut engine = common::engine(3, 3);
    engine
        .set_default_style(Style {
            background_color: Some("#000".into()),
            font: Some(FontPatch {
                bold: Some(false),
                size: Some(14.0),
                ..FontPatch::default()
            }),
            ..Style::default()
        })
        .unwrap();
    engine
        .load(GridData {
            styles: Some(vec![Style {
                background_color: Some("#fff".into()),
                font: Some(FontPatch {
                    bold: Some(true),
                    ..FontPatch::default()
                }),
                ..Style::default()
            }]),
            ..GridData::default()
        })
        .unwrap();

    let style = engine.resolve(Some(0)).unwrap();
    assert_eq!(style.background_color, "#fff");
    assert!(style.font.bold);
    assert_eq!(style.font.size, 14.0);

    // Omitted background falls back to the default like every other field
    let style = engine.resolve(None).unwrap();
    assert_eq!(style.background_color, "#000");
    assert!(!style.font.bold);
}

#[test]
fn test_explicit_false_overrides_default_wrap() {
    let mut engine = common::engine(3, 3);
    engine
        .set_default_style(Style {
            wrap_text: Some(true),
            ..Style::default()
        })
        .unwrap();
    engine
        .load(GridData {
            styles: Some(vec![Style {
                wrap_text: Some(false),
                ..Style::default()
            }]),
            ..GridData::default()
        })
        .unwrap();
    assert!(engine.resolve(None).unwrap().wrap_text);
    assert!(!engine.resolve(Some(0)).unwrap().wrap_text);
}

#[test]
fn test_new_row_creates_mapping() {
    let mut engine = common::engine_with(10, 10, r#"{"cells":{"0":{"0":{"text":"a"}}}}"#);
    assert!(engine.cells().as_map().get(&5).is_none());

    let previous = engine.set_cell(5, 5, Cell::new("new")).unwrap();
    assert!(previous.is_none());
    assert!(engine.cells().as_map().contains_key(&5));

    let mut seen = Vec::new();
    engine
        .cells()
        .for_each_populated(|row, col, cell| seen.push((row, col, cell.text.clone())));
    assert_eq!(
        seen,
        vec![(0, 0, "a".to_string()), (5, 5, "new".to_string())]
    );
}

#[test]
fn test_set_cell_replaces_existing() {
    let mut engine = common::engine(3, 3);
    engine.set_cell(1, 1, Cell::new("old")).unwrap();
    let previous = engine.set_cell(1, 1, Cell::new("new")).unwrap();
    assert_eq!(previous, Some(Cell::new("old")));
    assert_eq!(engine.cells().len(), 1);
}

#[test]
fn test_remove_cell_drops_empty_row() {
    let mut engine = common::engine(3, 3);
    engine.set_cell(2, 0, Cell::new("x")).unwrap();
    assert_eq!(engine.remove_cell(2, 0).unwrap(), Some(Cell::new("x")));
    assert!(engine.cells().as_map().is_empty());
    assert_eq!(engine.remove_cell(2, 0).unwrap(), None);
}

#[test]
fn test_load_rejects_cell_outside_grid() {
    let mut engine = common::engine(3, 3);
    assert!(engine
        .load_json(r#"{"rows":{"0":{"size":30}},"cells":{"3":{"0":{"text":"x"}}}}"#)
        .is_err());
    // Nothing applied
    assert!(engine.sizes().overrides(Axis::Rows).is_empty());
    assert!(engine.cells().is_empty());
}
