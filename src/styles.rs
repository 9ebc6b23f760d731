//! Style and border tables, and resolution of a cell's effective style.
//!
//! Cells carry an index into a flat styles table; styles carry indices into a
//! flat borders table. Resolution merges the indexed style onto the
//! table-wide default field by field, then onto built-in fallbacks so the
//! result is fully concrete.

use serde::Serialize;

use crate::cells::CellStore;
use crate::error::{Result, XlgridError};
use crate::types::{
    Border, Font, FontPatch, HAlign, Style, TextDecoration, VAlign,
};

/// Built-in background color
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
/// Built-in text color
pub const DEFAULT_TEXT_COLOR: &str = "#333333";
/// Built-in font family
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
/// Built-in font size in pixels
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// The table-wide default style used when none is configured
pub fn builtin_style() -> Style {
    Style {
        background_color: Some(DEFAULT_BACKGROUND.to_string()),
        horizontal_align: Some(HAlign::Left),
        vertical_align: Some(VAlign::Middle),
        wrap_text: Some(false),
        text_decoration: Some(TextDecoration::Normal),
        text_color: Some(DEFAULT_TEXT_COLOR.to_string()),
        font: Some(FontPatch {
            family: Some(DEFAULT_FONT_FAMILY.to_string()),
            size: Some(DEFAULT_FONT_SIZE),
            bold: Some(false),
            italic: Some(false),
        }),
        ..Style::default()
    }
}

/// Borders resolved from the borders table
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct EffectiveBorders {
    pub top: Option<Border>,
    pub right: Option<Border>,
    pub bottom: Option<Border>,
    pub left: Option<Border>,
    /// Applies to every side without its own border
    pub all: Option<Border>,
}

impl EffectiveBorders {
    pub fn top(&self) -> Option<&Border> {
        self.top.as_ref().or(self.all.as_ref())
    }

    pub fn right(&self) -> Option<&Border> {
        self.right.as_ref().or(self.all.as_ref())
    }

    pub fn bottom(&self) -> Option<&Border> {
        self.bottom.as_ref().or(self.all.as_ref())
    }

    pub fn left(&self) -> Option<&Border> {
        self.left.as_ref().or(self.all.as_ref())
    }
}

/// Fully merged, concrete style used to paint one cell
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveStyle {
    pub background_color: String,
    pub horizontal_align: HAlign,
    pub vertical_align: VAlign,
    pub wrap_text: bool,
    pub text_decoration: TextDecoration,
    pub text_color: String,
    pub font: Font,
    pub borders: EffectiveBorders,
}

/// Owns the styles table, the borders table and the table-wide default style
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    default_style: Style,
    styles: Vec<Style>,
    borders: Vec<Border>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(builtin_style())
    }
}

impl StyleRegistry {
    pub fn new(default_style: Style) -> Self {
        Self {
            default_style,
            styles: Vec::new(),
            borders: Vec::new(),
        }
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    pub fn set_styles(&mut self, styles: Vec<Style>) {
        self.styles = styles;
    }

    pub fn set_borders(&mut self, borders: Vec<Border>) {
        self.borders = borders;
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    /// Look up a style table entry, failing on a dangling index
    pub fn style(&self, index: usize) -> Result<&Style> {
        self.styles.get(index).ok_or(XlgridError::StyleIndex {
            index,
            len: self.styles.len(),
        })
    }

    /// Look up a border table entry, failing on a dangling index
    pub fn border(&self, index: usize) -> Result<&Border> {
        self.borders.get(index).ok_or(XlgridError::BorderIndex {
            index,
            len: self.borders.len(),
        })
    }

    /// Resolve a cell's style index into a concrete style.
    ///
    /// `None` resolves the table-wide default. An index into an empty styles
    /// table also resolves the default; an out-of-range index into a
    /// non-empty table is a data-integrity error.
    pub fn resolve(&self, style_index: Option<usize>) -> Result<EffectiveStyle> {
        let style = match style_index {
            Some(index) if !self.styles.is_empty() => Some(self.style(index)?),
            _ => None,
        };
        self.merge(style)
    }

    fn merge(&self, style: Option<&Style>) -> Result<EffectiveStyle> {
        let default = &self.default_style;
        let pick = |f: fn(&Style) -> Option<&String>, fallback: &str| -> String {
            style
                .and_then(f)
                .or_else(|| f(default))
                .map_or_else(|| fallback.to_string(), String::clone)
        };

        let empty_font = FontPatch::default();
        let default_font = default.font.as_ref().unwrap_or(&empty_font);
        let font = style
            .and_then(|s| s.font.as_ref())
            .map_or_else(|| default_font.clone(), |f| f.overlay(default_font));

        Ok(EffectiveStyle {
            background_color: pick(|s| s.background_color.as_ref(), DEFAULT_BACKGROUND),
            horizontal_align: style
                .and_then(|s| s.horizontal_align)
                .or(default.horizontal_align)
                .unwrap_or_default(),
            vertical_align: style
                .and_then(|s| s.vertical_align)
                .or(default.vertical_align)
                .unwrap_or_default(),
            wrap_text: style
                .and_then(|s| s.wrap_text)
                .or(default.wrap_text)
                .unwrap_or(false),
            text_decoration: style
                .and_then(|s| s.text_decoration)
                .or(default.text_decoration)
                .unwrap_or_default(),
            text_color: pick(|s| s.text_color.as_ref(), DEFAULT_TEXT_COLOR),
            font: Font {
                family: font
                    .family
                    .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
                size: font.size.unwrap_or(DEFAULT_FONT_SIZE),
                bold: font.bold.unwrap_or(false),
                italic: font.italic.unwrap_or(false),
            },
            borders: EffectiveBorders {
                top: self.side(style, |s| s.border_top_index)?,
                right: self.side(style, |s| s.border_right_index)?,
                bottom: self.side(style, |s| s.border_bottom_index)?,
                left: self.side(style, |s| s.border_left_index)?,
                all: self.side(style, |s| s.border_default_index)?,
            },
        })
    }

    /// Border indices come from the indexed style alone; the default style's
    /// borders apply only to cells that resolve to the default.
    fn side(&self, style: Option<&Style>, f: fn(&Style) -> Option<usize>) -> Result<Option<Border>> {
        let index = style.map_or_else(|| f(&self.default_style), f);
        index.map(|i| self.border(i).cloned()).transpose()
    }

    /// Resolve every cell with visible content against these tables,
    /// failing on the first dangling style or border index
    pub fn validate_cells(&self, cells: &CellStore) -> Result<()> {
        for (_, _, cell) in cells.iter().filter(|(_, _, c)| !c.text.is_empty()) {
            self.resolve(cell.style_index)?;
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
    use crate::types::{BorderLineStyle, Cell};

    fn registry() -> StyleRegistry {
        let mut reg = StyleRegistry::new(Style {
            background_color: Some("#000".into()),
            font: Some(FontPatch {
                bold: Some(false),
                size: Some(14.0),
                ..FontPatch::default()
            }),
            ..Style::default()
        });
        reg.set_styles(vec![Style {
            background_color: Some("#fff".into()),
            font: Some(FontPatch {
                bold: Some(true),
                ..FontPatch::default()
            }),
            ..Style::default()
        }]);
        reg
    }

    #[test]
    fn test_font_merges_per_field() {
        let style = registry().resolve(Some(0)).unwrap();
        assert_eq!(style.background_color, "#fff");
        assert!(style.font.bold);
        assert_eq!(style.font.size, 14.0);
        assert_eq!(style.font.family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_out_of_range_style_fails() {
        let err = registry().resolve(Some(7)).unwrap_err();
        assert!(matches!(err, XlgridError::StyleIndex { index: 7, len: 1 }));
    }

    #[test]
    fn test_empty_table_resolves_default() {
        let reg = StyleRegistry::default();
        let style = reg.resolve(Some(3)).unwrap();
        assert_eq!(style.background_color, DEFAULT_BACKGROUND);
        assert_eq!(style.vertical_align, VAlign::Middle);
    }

    #[test]
    fn test_vertical_align_uses_its_own_field() {
        let mut reg = StyleRegistry::default();
        reg.set_styles(vec![Style {
            horizontal_align: Some(HAlign::Right),
            ..Style::default()
        }]);
        let style = reg.resolve(Some(0)).unwrap();
        assert_eq!(style.horizontal_align, HAlign::Right);
        assert_eq!(style.vertical_align, VAlign::Middle);
    }

    #[test]
    fn test_borders_resolve_by_side() {
        let mut reg = StyleRegistry::default();
        reg.set_borders(vec![
            Border::new(1.0, BorderLineStyle::Solid, "#111"),
            Border::new(2.0, BorderLineStyle::Dashed, "#222"),
        ]);
        reg.set_styles(vec![Style {
            border_top_index: Some(1),
            border_default_index: Some(0),
            ..Style::default()
        }]);
        let borders = reg.resolve(Some(0)).unwrap().borders;
        assert_eq!(borders.top().unwrap().width, 2.0);
        assert_eq!(borders.left().unwrap().color, "#111");
        assert!(borders.right.is_none());
    }

    #[test]
    fn test_indexed_style_does_not_inherit_default_borders() {
        let mut reg = StyleRegistry::new(Style {
            border_top_index: Some(0),
            ..builtin_style()
        });
        reg.set_borders(vec![Border::new(1.0, BorderLineStyle::Solid, "#f00")]);
        reg.set_styles(vec![Style {
            background_color: Some("#eee".into()),
            ..Style::default()
        }]);
        assert!(reg.resolve(Some(0)).unwrap().borders.top().is_none());
        assert_eq!(reg.resolve(None).unwrap().borders.top().unwrap().color, "#f00");
    }

    #[test]
    fn test_dangling_default_border_spares_indexed_styles() {
        let mut reg = StyleRegistry::new(Style {
            border_left_index: Some(5),
            ..builtin_style()
        });
        reg.set_styles(vec![Style::default()]);
        assert!(reg.resolve(Some(0)).is_ok());
        assert!(matches!(
            reg.resolve(None),
            Err(XlgridError::BorderIndex { index: 5, len: 0 })
        ));
    }

    #[test]
    fn test_validate_cells_skips_blank_text() {
        let mut reg = StyleRegistry::default();
        reg.set_styles(vec![Style::default()]);
        let mut cells = CellStore::new();
        cells.set(0, 0, Cell::styled("", 9));
        assert!(reg.validate_cells(&cells).is_ok());
        cells.set(0, 1, Cell::styled("x", 9));
        assert!(matches!(
            reg.validate_cells(&cells),
            Err(XlgridError::StyleIndex { index: 9, len: 1 })
        ));
    }

    #[test]
    fn test_dangling_border_fails() {
        let mut reg = StyleRegistry::default();
        reg.set_styles(vec![Style {
            border_left_index: Some(0),
            ..Style::default()
        }]);
        assert!(matches!(
            reg.resolve(Some(0)),
            Err(XlgridError::BorderIndex { index: 0, len: 0 })
        ));
    }
}
