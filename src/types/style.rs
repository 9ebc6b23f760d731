use serde::{Deserialize, Serialize};
use std::fmt;

/// Style table entry. Every field is optional; absent fields fall back to
/// the table-wide default style at resolution time.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Fill
    #[serde(
        default,
        alias = "bgcolor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_color: Option<String>,

    // Alignment
    #[serde(default, alias = "align", skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<HAlign>,
    #[serde(default, alias = "valign", skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,

    // Text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, alias = "color", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontPatch>,

    // Borders (indices into the borders table)
    #[serde(default, alias = "bti", skip_serializing_if = "Option::is_none")]
    pub border_top_index: Option<usize>,
    #[serde(default, alias = "bri", skip_serializing_if = "Option::is_none")]
    pub border_right_index: Option<usize>,
    #[serde(default, alias = "bbi", skip_serializing_if = "Option::is_none")]
    pub border_bottom_index: Option<usize>,
    #[serde(default, alias = "bli", skip_serializing_if = "Option::is_none")]
    pub border_left_index: Option<usize>,
    #[serde(default, alias = "bi", skip_serializing_if = "Option::is_none")]
    pub border_default_index: Option<usize>,
}

/// Partial font description; merged field by field onto the default font
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct FontPatch {
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl FontPatch {
    /// Overlay `self` onto `base`: fields present here win.
    pub fn overlay(&self, base: &FontPatch) -> FontPatch {
        FontPatch {
            family: self.family.clone().or_else(|| base.family.clone()),
            size: self.size.or(base.size),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
        }
    }
}

/// Fully resolved font
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// CSS font shorthand, e.g. `italic bold 14px Arial`
    pub fn css(&self) -> String {
        let font_style = if self.italic { "italic " } else { "" };
        let font_weight = if self.bold { "bold " } else { "" };
        format!(
            "{}{}{}px {}",
            font_style, font_weight, self.size, self.family
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    /// Canvas `textAlign` keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    /// Canvas `textBaseline` keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    Normal,
    Underline,
    LineThrough,
}

/// Border line pattern
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderLineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderLineStyle {
    /// Canvas line dash pattern for a given stroke width (empty = solid)
    pub fn dash_pattern(self, width: f64) -> Vec<f64> {
        match self {
            Self::Solid | Self::Double => Vec::new(),
            Self::Dashed => vec![width * 3.0, width * 2.0],
            Self::Dotted => vec![width, width],
        }
    }
}

impl fmt::Display for BorderLineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
        };
        f.write_str(s)
    }
}

/// Border table entry. Serialized as the compact `[width, style, color]` triple.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(
    from = "(f64, BorderLineStyle, String)",
    into = "(f64, BorderLineStyle, String)"
)]
pub struct Border {
    pub width: f64,
    pub style: BorderLineStyle,
    pub color: String,
}

impl Border {
    pub fn new(width: f64, style: BorderLineStyle, color: impl Into<String>) -> Self {
        Self {
            width,
            style,
            color: color.into(),
        }
    }
}

impl From<(f64, BorderLineStyle, String)> for Border {
    fn from((width, style, color): (f64, BorderLineStyle, String)) -> Self {
        Self {
            width,
            style,
            color,
        }
    }
}

impl From<Border> for (f64, BorderLineStyle, String) {
    fn from(b: Border) -> Self {
        (b.width, b.style, b.color)
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
    fn test_font_css() {
        let font = Font {
            family: "Arial".into(),
            size: 14.0,
            bold: true,
            italic: true,
        };
        assert_eq!(font.css(), "italic bold 14px Arial");
    }

    #[test]
    fn test_border_tuple_json() {
        let border: Border = serde_json::from_str(r##"[2, "dashed", "#ff0000"]"##).unwrap();
        assert_eq!(border.width, 2.0);
        assert_eq!(border.style, BorderLineStyle::Dashed);
        assert_eq!(border.color, "#ff0000");
        assert_eq!(
            serde_json::to_string(&border).unwrap(),
            r##"[2.0,"dashed","#ff0000"]"##
        );
    }

    #[test]
    fn test_style_accepts_short_keys() {
        let style: Style =
            serde_json::from_str(r##"{"bgcolor":"#fff","align":"center","valign":"top","bi":3}"##)
                .unwrap();
        assert_eq!(style.background_color.as_deref(), Some("#fff"));
        assert_eq!(style.horizontal_align, Some(HAlign::Center));
        assert_eq!(style.vertical_align, Some(VAlign::Top));
        assert_eq!(style.border_default_index, Some(3));
    }

    #[test]
    fn test_font_overlay() {
        let base = FontPatch {
            family: Some("Arial".into()),
            size: Some(14.0),
            bold: Some(false),
            italic: Some(false),
        };
        let patch = FontPatch {
            bold: Some(true),
            ..FontPatch::default()
        };
        let merged = patch.overlay(&base);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.size, Some(14.0));
        assert_eq!(merged.family.as_deref(), Some("Arial"));
    }
}
