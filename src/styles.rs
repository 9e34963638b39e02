//! Static text styles and color resolution.
//!
//! Text styles are `const` so the compiler places them in read-only data and
//! draw code never constructs style objects per frame. Colors are different:
//! they arrive as configuration strings (`"teal"`, `"#ff8800"`), so the draw
//! path resolves them through [`resolve_color`] with a per-callsite fallback.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::RgbColor,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

// =============================================================================
// Palette
// =============================================================================

pub const WHITE: Rgb888 = Rgb888::WHITE;
pub const BLACK: Rgb888 = Rgb888::BLACK;
pub const TEAL: Rgb888 = Rgb888::new(0, 128, 128);
pub const DIM_GRAY: Rgb888 = Rgb888::new(105, 105, 105);
pub const ERROR_RED: Rgb888 = Rgb888::new(200, 40, 40);

/// Named colors accepted in configuration strings. Small on purpose: the
/// editor offers exactly this palette plus free-form hex.
const NAMED_COLORS: [(&str, Rgb888); 12] = [
    ("white", Rgb888::WHITE),
    ("black", Rgb888::BLACK),
    ("red", Rgb888::new(244, 67, 54)),
    ("green", Rgb888::new(76, 175, 80)),
    ("blue", Rgb888::new(33, 150, 243)),
    ("yellow", Rgb888::new(255, 235, 59)),
    ("orange", Rgb888::new(255, 152, 0)),
    ("purple", Rgb888::new(156, 39, 176)),
    ("pink", Rgb888::new(233, 30, 99)),
    ("teal", TEAL),
    ("cyan", Rgb888::new(0, 188, 212)),
    ("gray", Rgb888::new(158, 158, 158)),
];

/// Parse a configuration color: a palette name, `#rgb`, or `#rrggbb`.
pub fn parse_color(s: &str) -> Option<Rgb888> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    // "grey" is the one spelling alias worth carrying
    let lower = if lower == "grey" { "gray".to_string() } else { lower };
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, c)| *c)
}

/// Resolve a configuration color with a fallback for blank or unparseable
/// strings. Draw code never fails on a bad color.
pub fn resolve_color(s: &str, fallback: Rgb888) -> Rgb888 {
    if s.is_empty() {
        return fallback;
    }
    parse_color(s).unwrap_or(fallback)
}

fn parse_hex(hex: &str) -> Option<Rgb888> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // #abc expands to #aabbcc
            Some(Rgb888::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb888::new(r, g, b))
        }
        _ => None,
    }
}

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text. Titles, button labels, placeholder text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Header title and subtitle.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Title font. Usage: `MonoTextStyle::new(TITLE_FONT, resolved_color)`.
pub const TITLE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Subtitle font.
pub const SUBTITLE_FONT: &MonoFont = &PROFONT_18_POINT;

/// Button label font.
pub const LABEL_FONT: &MonoFont = &PROFONT_12_POINT;

/// Tiny annotation font (badge glyph fallback text).
pub const SMALL_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// White title text, the theme default.
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// White subtitle text.
pub const SUBTITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// White button label text.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

/// Dimmed label text for disabled buttons.
pub const LABEL_STYLE_DIM: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_12_POINT, DIM_GRAY);

/// Inline error text for a failed center control.
pub const ERROR_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_12_POINT, ERROR_RED);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_resolve() {
        assert_eq!(parse_color("teal"), Some(TEAL));
        assert_eq!(parse_color("Blue"), Some(Rgb888::new(33, 150, 243)));
        assert_eq!(parse_color("grey"), parse_color("gray"), "both spellings resolve");
    }

    #[test]
    fn test_hex_colors_resolve() {
        assert_eq!(parse_color("#ff8800"), Some(Rgb888::new(255, 136, 0)));
        assert_eq!(parse_color("#f80"), Some(Rgb888::new(255, 136, 0)), "#rgb expands per digit");
        assert_eq!(parse_color(" #000000 "), Some(Rgb888::BLACK), "whitespace is trimmed");
    }

    #[test]
    fn test_unparseable_colors_fall_back() {
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(resolve_color("not-a-color", TEAL), TEAL);
        assert_eq!(resolve_color("", WHITE), WHITE);
    }

    #[test]
    fn test_resolve_prefers_parsed_value() {
        assert_eq!(resolve_color("red", WHITE), Rgb888::new(244, 67, 54));
    }
}
