//! Text layout helpers shared by drawing surfaces.

use crate::render::surface::DrawBox;
use crate::types::VAlign;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.25;

/// Wrap text into lines that fit within `max_width`.
///
/// `measure` returns the rendered width of a string. Words wider than the
/// line are broken by character.
pub fn wrap_lines<F>(text: &str, max_width: f64, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            if !current_line.is_empty() {
                let test_line = format!("{} {}", current_line, word);
                if measure(&test_line) <= max_width {
                    current_line = test_line;
                    continue;
                }
                // Current line is full, start new line
                lines.push(std::mem::take(&mut current_line));
            }

            if measure(word) > max_width {
                let mut broken = break_word(word, max_width, &mut measure);
                // Last part stays open for following words
                current_line = broken.pop().unwrap_or_default();
                lines.extend(broken);
            } else {
                current_line = word.to_string();
            }
        }

        lines.push(current_line);
    }

    // Trailing empty line from a final newline is not drawn
    if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Break a single word that's too long to fit on one line
fn break_word<F>(word: &str, max_width: f64, measure: &mut F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    let mut parts: Vec<String> = Vec::new();
    let chars: Vec<char> = word.chars().collect();
    let mut start = 0;

    while start < chars.len() {
        let mut end = chars.len();

        while end > start + 1 {
            let test: String = chars
                .get(start..end)
                .map(|slice| slice.iter().collect())
                .unwrap_or_default();
            if measure(&test) <= max_width {
                break;
            }
            end -= 1;
        }

        let part: String = chars
            .get(start..end)
            .map(|slice| slice.iter().collect())
            .unwrap_or_default();
        parts.push(part);
        start = end;
    }

    parts
}

/// Baseline y of the first of `line_count` lines (baseline = `valign`)
pub fn first_line_y(dbox: &DrawBox, valign: VAlign, line_count: usize, line_height: f64) -> f64 {
    let extra = line_height * f64::from(u32::try_from(line_count.saturating_sub(1)).unwrap_or(0));
    match valign {
        VAlign::Top => dbox.text_y(VAlign::Top),
        VAlign::Middle => dbox.text_y(VAlign::Middle) - extra / 2.0,
        VAlign::Bottom => dbox.text_y(VAlign::Bottom) - extra,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;

    /// Every char is 10px wide
    fn mono(s: &str) -> f64 {
        s.chars().count() as f64 * 10.0
    }

    #[test]
    fn test_wrap_on_words() {
        let lines = wrap_lines("aaa bbb ccc", 75.0, mono);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_break_long_word() {
        let lines = wrap_lines("abcdefghij xy", 40.0, mono);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = wrap_lines("a\n\nb\n", 100.0, mono);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_first_line_y_middle() {
        let dbox = DrawBox::new(0.0, 0.0, 100.0, 100.0, 5.0);
        assert_eq!(first_line_y(&dbox, VAlign::Middle, 3, 10.0), 40.0);
        assert_eq!(first_line_y(&dbox, VAlign::Bottom, 3, 10.0), 75.0);
        assert_eq!(first_line_y(&dbox, VAlign::Top, 3, 10.0), 5.0);
    }
}
