use serde::{Deserialize, Serialize};

/// A single populated cell: raw text plus a style table reference
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Raw cell text (may be a formula such as `=SUM(A1:A3)`)
    #[serde(default)]
    pub text: String,
    /// Index into the styles table (`None` = table-wide default style)
    #[serde(
        default,
        alias = "si",
        skip_serializing_if = "Option::is_none"
    )]
    pub style_index: Option<usize>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_index: None,
        }
    }

    pub fn styled(text: impl Into<String>, style_index: usize) -> Self {
        Self {
            text: text.into(),
            style_index: Some(style_index),
        }
    }
}
