//! Drawing surface abstraction.
//!
//! This module defines the `DrawSurface` trait the render pipeline draws
//! through, allowing the Canvas 2D context and the recording surface used by
//! tests and the CLI to be used interchangeably.

use serde::Serialize;

use crate::styles::EffectiveBorders;
use crate::types::{Font, HAlign, TextDecoration, VAlign};

/// Stroke/fill/text attributes applied before a batch of draws.
///
/// `None` fields leave the surface's current value untouched.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<HAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_baseline: Option<VAlign>,
}

impl DrawAttrs {
    pub fn stroke(width: f64, color: &str) -> Self {
        Self {
            line_width: Some(width),
            stroke_style: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn fill(color: &str) -> Self {
        Self {
            fill_style: Some(color.to_string()),
            ..Self::default()
        }
    }
}

/// A cell box: outer rectangle, content padding, background and borders
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrawBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub background_color: Option<String>,
    pub borders: EffectiveBorders,
}

impl DrawBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64, padding: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            padding,
            background_color: None,
            borders: EffectiveBorders::default(),
        }
    }

    /// Width available to content after padding on both sides
    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding * 2.0).max(0.0)
    }

    /// Height available to content after padding on both sides
    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding * 2.0).max(0.0)
    }

    /// Text anchor x for a horizontal alignment
    pub fn text_x(&self, align: HAlign) -> f64 {
        match align {
            HAlign::Left => self.x + self.padding,
            HAlign::Center => self.x + self.width / 2.0,
            HAlign::Right => self.x + self.width - self.padding,
        }
    }

    /// Text anchor y for a vertical alignment
    pub fn text_y(&self, align: VAlign) -> f64 {
        match align {
            VAlign::Top => self.y + self.padding,
            VAlign::Middle => self.y + self.height / 2.0,
            VAlign::Bottom => self.y + self.height - self.padding,
        }
    }
}

/// Text attributes for a cell
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    pub align: HAlign,
    pub valign: VAlign,
    pub font: Font,
    pub color: String,
    pub decoration: TextDecoration,
}

/// Trait for drawing surfaces
///
/// Implementations translate these calls into actual pixels (Canvas 2D) or
/// record them for inspection.
pub trait DrawSurface {
    /// Surface size in logical pixels
    fn size(&self) -> (f64, f64);

    /// Clear the entire surface
    fn clear(&mut self);

    /// Push transform and attribute state
    fn save(&mut self);

    /// Pop transform and attribute state
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn set_attrs(&mut self, attrs: &DrawAttrs);

    /// Stroke a line segment with the current stroke attributes
    fn line(&mut self, from: (f64, f64), to: (f64, f64));

    /// Fill a rectangle with the current fill style
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill text at a point using the current font and alignment
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Paint a cell box: background fill then each bordered side
    fn draw_box(&mut self, dbox: &DrawBox);

    /// Draw text inside a cell box honoring alignment, font and wrapping
    fn draw_text(&mut self, text: &str, dbox: &DrawBox, attrs: &TextAttrs, wrap: bool);
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
    fn test_text_anchors() {
        let dbox = DrawBox::new(10.0, 20.0, 100.0, 30.0, 5.0);
        assert_eq!(dbox.text_x(HAlign::Left), 15.0);
        assert_eq!(dbox.text_x(HAlign::Center), 60.0);
        assert_eq!(dbox.text_x(HAlign::Right), 105.0);
        assert_eq!(dbox.text_y(VAlign::Top), 25.0);
        assert_eq!(dbox.text_y(VAlign::Middle), 35.0);
        assert_eq!(dbox.text_y(VAlign::Bottom), 45.0);
        assert_eq!(dbox.inner_width(), 90.0);
    }

    #[test]
    fn test_inner_size_never_negative() {
        let dbox = DrawBox::new(0.0, 0.0, 4.0, 0.0, 5.0);
        assert_eq!(dbox.inner_width(), 0.0);
        assert_eq!(dbox.inner_height(), 0.0);
    }
}
