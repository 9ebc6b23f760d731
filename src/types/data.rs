use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Border, Cell, SizeOverride, Style};

/// Sparse per-index size overrides for one axis
pub type OverrideMap = BTreeMap<u32, SizeOverride>;

/// Sparse two-level cell mapping: row index -> column index -> cell
pub type CellMap = BTreeMap<u32, BTreeMap<u32, Cell>>;

/// Dataset snapshot exchanged through load/export.
///
/// Every part is optional on load: only the supplied parts replace engine
/// state. Export always fills every part.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default, alias = "rowm", skip_serializing_if = "Option::is_none")]
    pub rows: Option<OverrideMap>,
    #[serde(default, alias = "colm", skip_serializing_if = "Option::is_none")]
    pub cols: Option<OverrideMap>,
    #[serde(default, alias = "cellmm", skip_serializing_if = "Option::is_none")]
    pub cells: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<Style>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<Border>>,
}

impl GridData {
    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the bundle to JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
