//! Structured error types for xlgrid.
//!
//! Every fallible engine operation returns [`Result`], so data-integrity
//! problems surface at the call that touched them instead of being papered
//! over with defaults.

use crate::types::Axis;

/// All errors that can occur while loading, mutating or rendering a grid.
#[derive(Debug, thiserror::Error)]
pub enum XlgridError {
    /// A cell references a style outside the styles table.
    #[error("Style index {index} out of range (styles table has {len} entries)")]
    StyleIndex { index: usize, len: usize },

    /// A style references a border outside the borders table.
    #[error("Border index {index} out of range (borders table has {len} entries)")]
    BorderIndex { index: usize, len: usize },

    /// Attempt to give a row or column a negative or non-finite size.
    #[error("Invalid {axis} size {size} at index {index}")]
    InvalidSize { axis: Axis, index: u32, size: f64 },

    /// A row or column index outside `[0, length)`.
    #[error("{axis} index {index} out of range (axis length {len})")]
    IndexOutOfRange { axis: Axis, index: u32, len: u32 },

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization of a data bundle or config.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlgridError>;

impl From<String> for XlgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlgridError> for wasm_bindgen::JsValue {
    fn from(e: XlgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
