//! Sparse cell storage.

use std::collections::BTreeMap;

use crate::types::{Cell, CellMap};

/// Row index -> column index -> cell. Only populated cells are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStore {
    rows: CellMap,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(rows: CellMap) -> Self {
        Self { rows }
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.rows.get(&row)?.get(&col)
    }

    /// Raw text of `(row, col)`, or `""` for an empty cell
    pub fn text(&self, row: u32, col: u32) -> &str {
        self.get(row, col).map_or("", |c| c.text.as_str())
    }

    /// Insert or replace a cell, returning the previous one
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) -> Option<Cell> {
        self.rows.entry(row).or_default().insert(col, cell)
    }

    /// Remove a cell; drops the row mapping once it is empty
    pub fn remove(&mut self, row: u32, col: u32) -> Option<Cell> {
        let cols = self.rows.get_mut(&row)?;
        let removed = cols.remove(&col);
        if cols.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Lazy traversal of every populated `(row, col, cell)`
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    pub fn for_each_populated<F>(&self, mut f: F)
    where
        F: FnMut(u32, u32, &Cell),
    {
        for (row, col, cell) in self.iter() {
            f(row, col, cell);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.values().all(BTreeMap::is_empty)
    }

    pub fn as_map(&self) -> &CellMap {
        &self.rows
    }

    pub fn replace(&mut self, rows: CellMap) {
        self.rows = rows;
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

    #[test]
    fn test_set_creates_row_mapping() {
        let mut store = CellStore::new();
        store.set(0, 0, Cell::new("a"));
        assert!(store.get(5, 5).is_none());
        store.set(5, 5, Cell::new("x"));
        assert_eq!(store.text(5, 5), "x");
        let new: Vec<_> = store.iter().filter(|(r, _, _)| *r == 5).collect();
        assert_eq!(new.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_replaces() {
        let mut store = CellStore::new();
        store.set(1, 2, Cell::new("old"));
        let prev = store.set(1, 2, Cell::styled("new", 0));
        assert_eq!(prev.unwrap().text, "old");
        assert_eq!(store.get(1, 2).unwrap().style_index, Some(0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_drops_empty_row() {
        let mut store = CellStore::new();
        store.set(3, 1, Cell::new("v"));
        assert!(store.remove(3, 1).is_some());
        assert!(store.as_map().is_empty());
        assert_eq!(store.text(3, 1), "");
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut store = CellStore::new();
        store.set(2, 0, Cell::new("b"));
        store.set(0, 1, Cell::new("a"));
        let first: Vec<_> = store.iter().map(|(r, c, _)| (r, c)).collect();
        let second: Vec<_> = store.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(first, second);
        let mut count = 0;
        store.for_each_populated(|_, _, _| count += 1);
        assert_eq!(count, 2);
    }
}
