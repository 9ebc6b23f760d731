use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two grid axes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("row"),
            Self::Columns => f.write_str("column"),
        }
    }
}

/// Whole-axis description before any per-index overrides
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    /// Number of addressable rows or columns
    #[serde(alias = "len")]
    pub length: u32,
    /// Size used by every index without an override
    pub default_size: f64,
}

impl AxisSpec {
    pub const fn new(length: u32, default_size: f64) -> Self {
        Self {
            length,
            default_size,
        }
    }
}

/// Per-index size deviation from the axis default
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SizeOverride {
    #[serde(alias = "height", alias = "width")]
    pub size: f64,
}

/// Translation applied to scrolled content
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Partial scroll update; absent axes keep their current offset
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct ScrollUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl ScrollUpdate {
    pub fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    pub fn y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }

    pub fn both(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}
