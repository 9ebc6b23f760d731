//! Canvas 2D drawing surface.
//!
//! Implements [`DrawSurface`] over the HTML Canvas 2D API via web-sys. Lines
//! are snapped to half pixels so 1px strokes stay crisp, and text widths are
//! cached per font since `measureText` is comparatively slow.

use std::collections::{HashMap, VecDeque};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::Result;
use crate::render::colors::{color_or, palette};
use crate::render::surface::{DrawAttrs, DrawBox, DrawSurface, TextAttrs};
use crate::render::text::{first_line_y, wrap_lines, LINE_HEIGHT_FACTOR};
use crate::types::{Border, BorderLineStyle, HAlign, TextDecoration, VAlign};

const TEXT_MEASURE_CACHE_CAP: usize = 4096;

/// Width cache keyed by `font \n text`, evicting oldest entries first
struct TextMeasureCache {
    entries: HashMap<String, f64>,
    order: VecDeque<String>,
    max_entries: usize,
}

impl TextMeasureCache {
    fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn key(font: &str, text: &str) -> String {
        let mut key = String::with_capacity(font.len() + 1 + text.len());
        key.push_str(font);
        key.push('\n');
        key.push_str(text);
        key
    }

    fn get(&self, font: &str, text: &str) -> Option<f64> {
        self.entries.get(&Self::key(font, text)).copied()
    }

    fn insert(&mut self, font: &str, text: &str, width: f64) {
        if self.max_entries == 0 {
            return;
        }
        let key = Self::key(font, text);
        if self.entries.contains_key(&key) {
            return;
        }
        self.entries.insert(key.clone(), width);
        self.order.push_back(key);
        while self.entries.len() > self.max_entries {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Drawing surface backed by a `<canvas>` element
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
    text_measure_cache: TextMeasureCache,
}

impl CanvasSurface {
    /// Create a surface from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = f64::from(canvas.width());
        let height = f64::from(canvas.height());

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: 1.0,
            text_measure_cache: TextMeasureCache::new(TEXT_MEASURE_CACHE_CAP),
        })
    }

    /// Resize the backing store to `width`×`height` logical pixels at `dpr`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;
        self.text_measure_cache.clear();

        // Set canvas buffer size to physical pixels
        self.canvas.set_width((width * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height * dpr).round().max(0.0) as u32);

        // Scale context for DPR (all drawing uses logical coordinates after this)
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }

    fn measure_text_cached(&mut self, text: &str, font: &str) -> f64 {
        if let Some(width) = self.text_measure_cache.get(font, text) {
            return width;
        }
        let width = self
            .ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0);
        self.text_measure_cache.insert(font, text, width);
        width
    }

    fn set_line_dash(&self, pattern: &[f64]) {
        let array = js_sys::Array::new();
        for v in pattern {
            array.push(&JsValue::from_f64(*v));
        }
        let _ = self.ctx.set_line_dash(&array);
    }

    fn stroke_segment(&self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(Self::crisp(x1), Self::crisp(y1));
        self.ctx.line_to(Self::crisp(x2), Self::crisp(y2));
        self.ctx.stroke();
    }

    fn draw_border_line(&self, from: (f64, f64), to: (f64, f64), border: &Border) {
        let color = color_or(&border.color, palette::BLACK);
        self.ctx.set_stroke_style_str(&color);
        self.ctx.set_line_width(border.width);
        self.set_line_dash(&border.style.dash_pattern(border.width));

        if border.style == BorderLineStyle::Double {
            // Two thin strokes either side of the edge
            let horizontal = (from.1 - to.1).abs() < f64::EPSILON;
            let (dx, dy) = if horizontal { (0.0, 1.0) } else { (1.0, 0.0) };
            self.ctx.set_line_width(1.0);
            self.stroke_segment(from.0 - dx, from.1 - dy, to.0 - dx, to.1 - dy);
            self.stroke_segment(from.0 + dx, from.1 + dy, to.0 + dx, to.1 + dy);
        } else {
            self.stroke_segment(from.0, from.1, to.0, to.1);
        }
        self.set_line_dash(&[]);
    }

    fn draw_decoration(&mut self, line: &str, x: f64, y: f64, attrs: &TextAttrs, font: &str) {
        let Some(offset) = decoration_offset(attrs.decoration, attrs.valign, attrs.font.size)
        else {
            return;
        };
        let width = self.measure_text_cached(line, font);
        let start = match attrs.align {
            HAlign::Left => x,
            HAlign::Center => x - width / 2.0,
            HAlign::Right => x - width,
        };
        let color = color_or(&attrs.color, palette::BLACK);
        self.ctx.set_stroke_style_str(&color);
        self.ctx.set_line_width((attrs.font.size / 14.0).max(1.0));
        self.ctx.begin_path();
        self.ctx.move_to(start, y + offset);
        self.ctx.line_to(start + width, y + offset);
        self.ctx.stroke();
    }
}

/// Vertical offset of a decoration line from the text anchor
fn decoration_offset(decoration: TextDecoration, baseline: VAlign, size: f64) -> Option<f64> {
    let underline = match baseline {
        VAlign::Top => size,
        VAlign::Middle => size / 2.0,
        VAlign::Bottom => 0.0,
    };
    match decoration {
        TextDecoration::Normal => None,
        TextDecoration::Underline => Some(underline + 1.0),
        TextDecoration::LineThrough => Some(underline - size / 2.0),
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let _ = self.ctx.translate(dx, dy);
    }

    fn set_attrs(&mut self, attrs: &DrawAttrs) {
        if let Some(width) = attrs.line_width {
            self.ctx.set_line_width(width);
        }
        if let Some(ref color) = attrs.stroke_style {
            self.ctx.set_stroke_style_str(&color_or(color, palette::GRID_LINE));
        }
        if let Some(ref color) = attrs.fill_style {
            self.ctx.set_fill_style_str(&color_or(color, palette::BLACK));
        }
        if let Some(ref font) = attrs.font {
            self.ctx.set_font(font);
        }
        if let Some(align) = attrs.text_align {
            self.ctx.set_text_align(align.as_css());
        }
        if let Some(baseline) = attrs.text_baseline {
            self.ctx.set_text_baseline(baseline.as_css());
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.stroke_segment(from.0, from.1, to.0, to.1);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_box(&mut self, dbox: &DrawBox) {
        let (x1, y1) = (dbox.x, dbox.y);
        let (x2, y2) = (dbox.x + dbox.width, dbox.y + dbox.height);

        if let Some(ref bg) = dbox.background_color {
            self.ctx.set_fill_style_str(&color_or(bg, palette::WHITE));
            self.ctx.fill_rect(x1, y1, dbox.width, dbox.height);
        }

        let borders = &dbox.borders;
        if let Some(border) = borders.top() {
            self.draw_border_line((x1, y1), (x2, y1), border);
        }
        if let Some(border) = borders.right() {
            self.draw_border_line((x2, y1), (x2, y2), border);
        }
        if let Some(border) = borders.bottom() {
            self.draw_border_line((x1, y2), (x2, y2), border);
        }
        if let Some(border) = borders.left() {
            self.draw_border_line((x1, y1), (x1, y2), border);
        }
    }

    fn draw_text(&mut self, text: &str, dbox: &DrawBox, attrs: &TextAttrs, wrap: bool) {
        let font = attrs.font.css();
        self.ctx.save();

        // Clip to the cell so overflow never paints into neighbours
        self.ctx.begin_path();
        self.ctx.rect(dbox.x, dbox.y, dbox.width, dbox.height);
        self.ctx.clip();

        self.ctx.set_font(&font);
        self.ctx
            .set_fill_style_str(&color_or(&attrs.color, palette::BLACK));
        self.ctx.set_text_align(attrs.align.as_css());
        self.ctx.set_text_baseline(attrs.valign.as_css());

        let lines = if wrap {
            let max_width = dbox.inner_width();
            wrap_lines(text, max_width, |s| self.measure_text_cached(s, &font))
        } else {
            vec![text.to_string()]
        };

        let line_height = attrs.font.size * LINE_HEIGHT_FACTOR;
        let x = dbox.text_x(attrs.align);
        let mut y = first_line_y(dbox, attrs.valign, lines.len(), line_height);
        for line in &lines {
            let _ = self.ctx.fill_text(line, x, y);
            self.draw_decoration(line, x, y, attrs, &font);
            y += line_height;
        }

        self.ctx.restore();
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
    fn text_measure_cache_reuses_entries() {
        let mut cache = TextMeasureCache::new(2);
        assert_eq!(cache.get("14px Arial", "hello"), None);
        cache.insert("14px Arial", "hello", 12.0);
        assert_eq!(cache.get("14px Arial", "hello"), Some(12.0));
        cache.insert("14px Arial", "hello", 22.0);
        assert_eq!(cache.get("14px Arial", "hello"), Some(12.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn text_measure_cache_enforces_cap() {
        let mut cache = TextMeasureCache::new(2);
        cache.insert("14px Arial", "a", 1.0);
        cache.insert("14px Arial", "b", 2.0);
        cache.insert("14px Arial", "c", 3.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("14px Arial", "a"), None);
        assert_eq!(cache.get("14px Arial", "c"), Some(3.0));
    }

    #[test]
    fn decoration_offsets_follow_baseline() {
        assert_eq!(
            decoration_offset(TextDecoration::Normal, VAlign::Middle, 14.0),
            None
        );
        assert_eq!(
            decoration_offset(TextDecoration::Underline, VAlign::Middle, 14.0),
            Some(8.0)
        );
        assert_eq!(
            decoration_offset(TextDecoration::LineThrough, VAlign::Top, 14.0),
            Some(7.0)
        );
        assert_eq!(
            decoration_offset(TextDecoration::LineThrough, VAlign::Bottom, 14.0),
            Some(-7.0)
        );
    }
}
