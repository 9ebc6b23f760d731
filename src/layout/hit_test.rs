//! Pointer position to cell mapping.
//!
//! Walks the same [`AxisWalk`](super::AxisWalk) positions the render pipeline
//! draws from, offset by the fixed headers and the scroll translation.

use serde::Serialize;

use super::SizeModel;
use crate::types::{Axis, ScrollOffset};

/// Rectangle representing a cell's bounds
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    /// Width of the cell
    pub width: f64,
    /// Height of the cell
    pub height: f64,
}

impl CellRect {
    /// Same rectangle moved by `(dx, dy)`
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Whether a point lies inside (left/top edges inclusive, right/bottom exclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Result of a hit test.
///
/// `rect` is expressed in unscrolled coordinates: header offset included,
/// scroll translation removed. A `row` equal to the row count (or `col`
/// equal to the column count) means the point lies past the content.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellHit {
    pub row: u32,
    pub col: u32,
    pub rect: CellRect,
}

impl CellHit {
    /// True if the hit addresses a real cell on both axes
    pub fn is_content(&self, sizes: &SizeModel) -> bool {
        self.row < sizes.len(Axis::Rows) && self.col < sizes.len(Axis::Columns)
    }
}

/// Maps pixel positions to cells for one frame of engine state
pub struct HitTester<'a> {
    sizes: &'a SizeModel,
    scroll: ScrollOffset,
    header_width: f64,
    header_height: f64,
}

impl<'a> HitTester<'a> {
    pub fn new(
        sizes: &'a SizeModel,
        scroll: ScrollOffset,
        header_width: f64,
        header_height: f64,
    ) -> Self {
        Self {
            sizes,
            scroll,
            header_width,
            header_height,
        }
    }

    /// Locate the cell under `(x, y)`.
    ///
    /// A point exactly on a boundary belongs to the following cell.
    pub fn locate(&self, x: f64, y: f64) -> CellHit {
        let (row, top, height) =
            self.locate_on_axis(Axis::Rows, self.header_height, self.scroll.y, y);
        let (col, left, width) =
            self.locate_on_axis(Axis::Columns, self.header_width, self.scroll.x, x);
        CellHit {
            row,
            col,
            rect: CellRect {
                x: left,
                y: top,
                width,
                height,
            },
        }
    }

    /// Unscrolled rectangle of `(row, col)` as `locate` reports it
    pub fn sheet_rect(&self, row: u32, col: u32) -> CellRect {
        self.sizes
            .cell_rect(row, col)
            .translated(self.header_width, self.header_height)
    }

    /// Returns `(index, unscrolled start, size)` for a position on one axis.
    fn locate_on_axis(&self, axis: Axis, header: f64, scroll: f64, pos: f64) -> (u32, f64, f64) {
        let len = self.sizes.len(axis);
        let origin = header + scroll;
        let mut hit = (len, 0.0, self.sizes.spec(axis).default_size);
        for (index, offset, size) in self.sizes.walk(axis, len) {
            hit = (index, offset, size);
            if origin + offset + size > pos {
                break;
            }
        }
        let (index, offset, size) = hit;
        (index, header + offset, size)
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
    use crate::types::AxisSpec;

    fn sizes() -> SizeModel {
        SizeModel::new(AxisSpec::new(3, 25.0), AxisSpec::new(3, 100.0))
    }

    #[test]
    fn test_locate_first_cell() {
        let sizes = sizes();
        let hit = HitTester::new(&sizes, ScrollOffset::default(), 60.0, 25.0).locate(70.0, 30.0);
        assert_eq!((hit.row, hit.col), (0, 0));
        assert_eq!(
            hit.rect,
            CellRect {
                x: 60.0,
                y: 25.0,
                width: 100.0,
                height: 25.0
            }
        );
    }

    #[test]
    fn test_boundary_belongs_to_next_cell() {
        let sizes = sizes();
        let tester = HitTester::new(&sizes, ScrollOffset::default(), 60.0, 25.0);
        let hit = tester.locate(160.0, 50.0);
        assert_eq!((hit.row, hit.col), (1, 1));
        assert_eq!(hit.rect.x, 160.0);
        assert_eq!(hit.rect.y, 50.0);
    }

    #[test]
    fn test_past_content_is_boundary_index() {
        let sizes = sizes();
        let tester = HitTester::new(&sizes, ScrollOffset::default(), 60.0, 25.0);
        let hit = tester.locate(10_000.0, 10_000.0);
        assert_eq!((hit.row, hit.col), (3, 3));
        assert!(!hit.is_content(&sizes));
        assert_eq!(hit.rect.x, 360.0);
        assert_eq!(hit.rect.width, 100.0);
    }

    #[test]
    fn test_scroll_removed_from_rect() {
        let sizes = sizes();
        let scroll = ScrollOffset { x: -100.0, y: -25.0 };
        let tester = HitTester::new(&sizes, scroll, 60.0, 25.0);
        let hit = tester.locate(70.0, 30.0);
        assert_eq!((hit.row, hit.col), (1, 1));
        assert_eq!(hit.rect, tester.sheet_rect(1, 1));
    }
}
