//! Row/column size model: a dense default per axis with sparse overrides.
//!
//! Sizes are never materialized into a dense array. Per-index positions are
//! produced by [`AxisWalk`], the single cumulative-size routine shared by the
//! render pipeline and the hit tester so the two can never disagree.

use crate::error::{Result, XlgridError};
use crate::layout::CellRect;
use crate::types::{Axis, AxisSpec, OverrideMap, SizeOverride};

/// Owns both axis specs and their per-index overrides
#[derive(Debug, Clone)]
pub struct SizeModel {
    rows: AxisSpec,
    cols: AxisSpec,
    row_overrides: OverrideMap,
    col_overrides: OverrideMap,
}

impl SizeModel {
    pub fn new(rows: AxisSpec, cols: AxisSpec) -> Self {
        Self {
            rows,
            cols,
            row_overrides: OverrideMap::new(),
            col_overrides: OverrideMap::new(),
        }
    }

    pub fn spec(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::Rows => &self.rows,
            Axis::Columns => &self.cols,
        }
    }

    /// Number of addressable indices on `axis`
    pub fn len(&self, axis: Axis) -> u32 {
        self.spec(axis).length
    }

    pub fn overrides(&self, axis: Axis) -> &OverrideMap {
        match axis {
            Axis::Rows => &self.row_overrides,
            Axis::Columns => &self.col_overrides,
        }
    }

    fn overrides_mut(&mut self, axis: Axis) -> &mut OverrideMap {
        match axis {
            Axis::Rows => &mut self.row_overrides,
            Axis::Columns => &mut self.col_overrides,
        }
    }

    /// Size of one index: its override if present, else the axis default.
    ///
    /// Also answers for the boundary index (`length`), which never carries an
    /// override and therefore always reports the default.
    pub fn size_of(&self, axis: Axis, index: u32) -> f64 {
        self.overrides(axis)
            .get(&index)
            .map_or(self.spec(axis).default_size, |o| o.size)
    }

    /// Sum of the sizes of indices `[0, index)`
    pub fn cumulative_before(&self, axis: Axis, index: u32) -> f64 {
        self.span(axis, index).0
    }

    /// `(cumulative_before(index), size_of(index))` from a single walk
    pub fn span(&self, axis: Axis, index: u32) -> (f64, f64) {
        let mut span = (0.0, self.size_of(axis, 0));
        for (_, offset, size) in self.walk(axis, index) {
            span = (offset, size);
        }
        span
    }

    /// Total extent of the axis, in closed form over the sparse overrides
    pub fn total_extent(&self, axis: Axis) -> f64 {
        let spec = self.spec(axis);
        let overrides = self.overrides(axis);
        let override_total: f64 = overrides.values().map(|o| o.size).sum();
        let override_count = u32::try_from(overrides.len()).unwrap_or(u32::MAX);
        f64::from(spec.length.saturating_sub(override_count)) * spec.default_size + override_total
    }

    /// Walk indices `0..=last` yielding `(index, offset, size)`
    pub fn walk(&self, axis: Axis, last: u32) -> AxisWalk<'_> {
        AxisWalk {
            model: self,
            axis,
            next: 0,
            last: u64::from(last),
            offset: 0.0,
        }
    }

    /// Cell bounds in content coordinates (before header offset and scroll)
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let (y, height) = self.span(Axis::Rows, row);
        let (x, width) = self.span(Axis::Columns, col);
        CellRect {
            x,
            y,
            width,
            height,
        }
    }

    /// Set (or replace) the override for one index
    pub fn set_size(&mut self, axis: Axis, index: u32, size: f64) -> Result<()> {
        Self::validate(self.len(axis), axis, index, size)?;
        self.overrides_mut(axis).insert(index, SizeOverride { size });
        Ok(())
    }

    /// Drop the override for one index, returning it to the axis default
    pub fn clear_size(&mut self, axis: Axis, index: u32) -> Option<SizeOverride> {
        self.overrides_mut(axis).remove(&index)
    }

    /// Replace every override on `axis`. Validates the whole map first.
    pub fn replace_overrides(&mut self, axis: Axis, overrides: OverrideMap) -> Result<()> {
        Self::validate_overrides(self.len(axis), axis, &overrides)?;
        *self.overrides_mut(axis) = overrides;
        Ok(())
    }

    /// Check an override map against an axis length without applying it
    pub fn validate_overrides(len: u32, axis: Axis, overrides: &OverrideMap) -> Result<()> {
        for (&index, o) in overrides {
            Self::validate(len, axis, index, o.size)?;
        }
        Ok(())
    }

    fn validate(len: u32, axis: Axis, index: u32, size: f64) -> Result<()> {
        if index >= len {
            return Err(XlgridError::IndexOutOfRange { axis, index, len });
        }
        if !size.is_finite() || size < 0.0 {
            return Err(XlgridError::InvalidSize { axis, index, size });
        }
        Ok(())
    }
}

/// Iterator over `(index, offset, size)` along one axis
pub struct AxisWalk<'a> {
    model: &'a SizeModel,
    axis: Axis,
    next: u64,
    last: u64,
    offset: f64,
}

impl Iterator for AxisWalk<'_> {
    type Item = (u32, f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let index = u32::try_from(self.next).ok()?;
        let size = self.model.size_of(self.axis, index);
        let offset = self.offset;
        self.offset += size;
        self.next += 1;
        Some((index, offset, size))
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

    fn model() -> SizeModel {
        SizeModel::new(AxisSpec::new(3, 25.0), AxisSpec::new(3, 100.0))
    }

    #[test]
    fn test_default_extents() {
        let sizes = model();
        assert_eq!(sizes.total_extent(Axis::Rows), 75.0);
        assert_eq!(sizes.total_extent(Axis::Columns), 300.0);
        assert_eq!(sizes.cumulative_before(Axis::Rows, 3), 75.0);
    }

    #[test]
    fn test_override_row() {
        let mut sizes = model();
        sizes.set_size(Axis::Rows, 1, 50.0).unwrap();
        assert_eq!(sizes.cumulative_before(Axis::Rows, 2), 75.0);
        assert_eq!(sizes.total_extent(Axis::Rows), 100.0);
        assert_eq!(sizes.size_of(Axis::Rows, 1), 50.0);
        assert_eq!(sizes.size_of(Axis::Rows, 0), 25.0);
    }

    #[test]
    fn test_walk_includes_boundary() {
        let sizes = model();
        let steps: Vec<_> = sizes.walk(Axis::Columns, 3).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3], (3, 300.0, 100.0));
    }

    #[test]
    fn test_span_at_zero() {
        let sizes = model();
        assert_eq!(sizes.span(Axis::Rows, 0), (0.0, 25.0));
    }

    #[test]
    fn test_rejects_negative_and_out_of_range() {
        let mut sizes = model();
        assert!(matches!(
            sizes.set_size(Axis::Rows, 0, -1.0),
            Err(XlgridError::InvalidSize { .. })
        ));
        assert!(matches!(
            sizes.set_size(Axis::Columns, 3, 10.0),
            Err(XlgridError::IndexOutOfRange { .. })
        ));
        assert!(sizes.overrides(Axis::Rows).is_empty());
    }

    #[test]
    fn test_zero_size_is_hidden() {
        let mut sizes = model();
        sizes.set_size(Axis::Rows, 0, 0.0).unwrap();
        assert_eq!(sizes.total_extent(Axis::Rows), 50.0);
        assert_eq!(sizes.cell_rect(1, 0).y, 0.0);
    }
}
