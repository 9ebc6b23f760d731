//! Engine configuration.
//!
//! Every field has a default, so a config can be given as a partial JSON
//! object (CLI `--config`) or JS object (viewer constructor).

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlgridError};
use crate::render::colors::palette;
use crate::styles::builtin_style;
use crate::types::{AxisSpec, Style};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 25.0;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f64 = 100.0;

/// Fixed header configuration (dimensions and colors)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    /// Width of the row-number header column in pixels
    pub row_header_width: f64,
    /// Height of the column-letter header row in pixels
    pub col_header_height: f64,
    /// Background color for headers
    pub background_color: String,
    /// Text color for header labels
    pub text_color: String,
    /// CSS font for header labels
    pub font: String,
    /// Separator line color
    pub line_color: String,
    /// Separator line width
    pub line_width: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            row_header_width: 60.0,
            col_header_height: DEFAULT_ROW_HEIGHT,
            background_color: palette::HEADER_BG.to_string(),
            text_color: palette::HEADER_TEXT.to_string(),
            font: "500 12px sans-serif".to_string(),
            line_color: palette::GRID_LINE.to_string(),
            line_width: 0.5,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub rows: AxisSpec,
    pub cols: AxisSpec,
    pub header: HeaderConfig,
    pub grid_line_color: String,
    pub grid_line_width: f64,
    /// Inset between a cell's edge and its content
    pub cell_padding: f64,
    /// Table-wide default style
    pub default_style: Style,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: AxisSpec::new(100, DEFAULT_ROW_HEIGHT),
            cols: AxisSpec::new(26, DEFAULT_COL_WIDTH),
            header: HeaderConfig::default(),
            grid_line_color: palette::GRID_LINE.to_string(),
            grid_line_width: 0.5,
            cell_padding: 5.0,
            default_style: builtin_style(),
        }
    }
}

impl GridConfig {
    /// Config with the given axes and defaults elsewhere
    pub fn with_axes(rows: AxisSpec, cols: AxisSpec) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes the geometry cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in [("rows", &self.rows), ("cols", &self.cols)] {
            if !spec.default_size.is_finite() || spec.default_size <= 0.0 {
                return Err(XlgridError::Config(format!(
                    "{name}.defaultSize must be positive, got {}",
                    spec.default_size
                )));
            }
        }
        let non_negative = [
            ("header.rowHeaderWidth", self.header.row_header_width),
            ("header.colHeaderHeight", self.header.col_header_height),
            ("cellPadding", self.cell_padding),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(XlgridError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
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
    fn test_partial_json_uses_defaults() {
        let config =
            GridConfig::from_json(r#"{"rows":{"len":10,"defaultSize":30},"cellPadding":2}"#)
                .unwrap();
        assert_eq!(config.rows, AxisSpec::new(10, 30.0));
        assert_eq!(config.cols, AxisSpec::new(26, DEFAULT_COL_WIDTH));
        assert_eq!(config.cell_padding, 2.0);
        assert_eq!(config.header.row_header_width, 60.0);
    }

    #[test]
    fn test_rejects_zero_default_size() {
        let err = GridConfig::from_json(r#"{"cols":{"length":3,"defaultSize":0}}"#).unwrap_err();
        assert!(matches!(err, XlgridError::Config(_)));
    }

    #[test]
    fn test_rejects_negative_header() {
        let mut config = GridConfig::default();
        config.header.row_header_width = -1.0;
        assert!(config.validate().is_err());
    }
}
