//! In-memory drawing surface.
//!
//! Records every call as a [`DrawCommand`] so frames can be inspected by tests
//! and dumped as JSON by the CLI. Text is measured with a fixed per-character
//! advance so wrapping is deterministic.

use serde::Serialize;

use crate::render::surface::{DrawAttrs, DrawBox, DrawSurface, TextAttrs};
use crate::render::text::{first_line_y, wrap_lines, LINE_HEIGHT_FACTOR};

/// Character advance as a fraction of the font size
const CHAR_ADVANCE: f64 = 0.6;

/// One recorded surface call
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    SetAttrs(DrawAttrs),
    Line {
        from: (f64, f64),
        to: (f64, f64),
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    DrawBox(DrawBox),
    /// Cell text after wrapping, one entry per line
    DrawText {
        lines: Vec<String>,
        x: f64,
        y: f64,
        line_height: f64,
        attrs: TextAttrs,
    },
}

/// A surface that records commands instead of producing pixels
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands since the most recent `clear`, i.e. the last complete frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .unwrap_or(0);
        self.commands.get(start..).unwrap_or_default()
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Estimated width of `text` at `font_size`
    pub fn measure(text: &str, font_size: f64) -> f64 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        f64::from(chars) * font_size * CHAR_ADVANCE
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        // Earlier frames are discarded the same way a canvas is wiped
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn set_attrs(&mut self, attrs: &DrawAttrs) {
        self.commands.push(DrawCommand::SetAttrs(attrs.clone()));
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_box(&mut self, dbox: &DrawBox) {
        self.commands.push(DrawCommand::DrawBox(dbox.clone()));
    }

    fn draw_text(&mut self, text: &str, dbox: &DrawBox, attrs: &TextAttrs, wrap: bool) {
        let font_size = attrs.font.size;
        let lines = if wrap {
            wrap_lines(text, dbox.inner_width(), |s| Self::measure(s, font_size))
        } else {
            vec![text.to_string()]
        };
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let y = first_line_y(dbox, attrs.valign, lines.len(), line_height);
        self.commands.push(DrawCommand::DrawText {
            x: dbox.text_x(attrs.align),
            y,
            line_height,
            lines,
            attrs: attrs.clone(),
        });
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
    use crate::types::{Font, HAlign, TextDecoration, VAlign};

    fn attrs() -> TextAttrs {
        TextAttrs {
            align: HAlign::Left,
            valign: VAlign::Top,
            font: Font {
                family: "Arial".into(),
                size: 10.0,
                bold: false,
                italic: false,
            },
            color: "#333".into(),
            decoration: TextDecoration::Normal,
        }
    }

    #[test]
    fn test_clear_starts_new_frame() {
        let mut s = RecordingSurface::default();
        s.save();
        s.clear();
        s.restore();
        assert_eq!(s.commands(), &[DrawCommand::Clear, DrawCommand::Restore]);
        assert_eq!(s.last_frame().len(), 2);
    }

    #[test]
    fn test_draw_text_wraps_to_inner_width() {
        let mut s = RecordingSurface::default();
        // inner width 40 -> 6 chars at 6px
        let dbox = DrawBox::new(0.0, 0.0, 50.0, 100.0, 5.0);
        s.draw_text("abc def ghi", &dbox, &attrs(), true);
        match &s.commands()[0] {
            DrawCommand::DrawText { lines, x, y, .. } => {
                assert_eq!(lines, &vec!["abc", "def", "ghi"]);
                assert_eq!(*x, 5.0);
                assert_eq!(*y, 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_draw_text_without_wrap_is_single_line() {
        let mut s = RecordingSurface::default();
        let dbox = DrawBox::new(0.0, 0.0, 50.0, 100.0, 5.0);
        s.draw_text("abc def ghi", &dbox, &attrs(), false);
        match &s.commands()[0] {
            DrawCommand::DrawText { lines, .. } => assert_eq!(lines.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let json = serde_json::to_string(&DrawCommand::Translate { dx: 1.0, dy: 2.0 }).unwrap();
        assert_eq!(json, r#"{"op":"translate","dx":1.0,"dy":2.0}"#);
    }
}
