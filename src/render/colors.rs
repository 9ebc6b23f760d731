//! Color normalization utilities for grid rendering.
//!
//! Colors travel through the engine as CSS color strings, which are directly
//! usable by Canvas 2D.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Parse a color string and normalize it to CSS format.
///
/// Supports formats:
/// - "#RGB" and "#RRGGBB" (hex)
/// - "#AARRGGBB" (alpha first)
/// - "RRGGBB" (hex without # prefix)
/// - "rgb(...)", "rgba(...)", "hsl(...)" and named colors (passed through)
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();

    if s.starts_with('#') {
        parse_hex_color(s)
    } else if s.starts_with("rgb") || s.starts_with("hsl") {
        Some(s.to_string())
    } else if let Some(hex) = parse_hex_color(&format!("#{}", s)) {
        Some(hex)
    } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(s.to_ascii_lowercase())
    } else {
        None
    }
}

fn parse_hex_color(s: &str) -> Option<CssColor> {
    let hex = s.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 | 6 => Some(format!("#{}", hex)),
        8 => {
            // #AARRGGBB - convert to rgba()
            let a = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let r = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(6..8)?, 16).ok()?;

            if a == 255 {
                Some(format!("#{:02X}{:02X}{:02X}", r, g, b))
            } else {
                let alpha = f64::from(a) / 255.0;
                Some(format!("rgba({}, {}, {}, {:.2})", r, g, b, alpha))
            }
        }
        _ => None,
    }
}

/// Normalize a color, falling back when it cannot be parsed
pub fn color_or<'a>(s: &str, fallback: &'a str) -> std::borrow::Cow<'a, str> {
    parse_color(s).map_or(std::borrow::Cow::Borrowed(fallback), std::borrow::Cow::Owned)
}

/// Common colors used in grid rendering (CSS format)
pub mod palette {
    pub const WHITE: &str = "#ffffff";
    pub const BLACK: &str = "#000000";

    /// Content grid line color (light gray)
    pub const GRID_LINE: &str = "#d0d0d0";

    /// Fixed header background
    pub const HEADER_BG: &str = "#f4f5f8";

    /// Fixed header label color
    pub const HEADER_TEXT: &str = "#585757";
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
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#fff").unwrap(), "#fff");
    }

    #[test]
    fn test_parse_hex_8_opaque() {
        assert_eq!(parse_color("#FFFF0000").unwrap(), "#FF0000");
    }

    #[test]
    fn test_parse_hex_8_transparent() {
        let color = parse_color("#80FF0000").unwrap();
        assert!(color.starts_with("rgba(255, 0, 0,"));
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(parse_color("FF0000").unwrap(), "#FF0000");
    }

    #[test]
    fn test_named_and_functional_pass_through() {
        assert_eq!(parse_color("Red").unwrap(), "red");
        assert_eq!(parse_color("rgb(1, 2, 3)").unwrap(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_invalid_falls_back() {
        assert!(parse_color("#12").is_none());
        assert_eq!(color_or("not a color", palette::BLACK), palette::BLACK);
    }
}
