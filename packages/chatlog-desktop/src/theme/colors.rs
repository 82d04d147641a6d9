//! Color utilities for palettes and highlighted code

use chatlog_core::Color;
use gpui::Hsla;

/// Parse a hex color string to Hsla
/// Supports formats: #RGB, #RRGGBB, #RRGGBBAA
pub fn hex(color: &str) -> Hsla {
    let color = color.trim_start_matches('#');
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    let parsed = match color.len() {
        3 => {
            let digit = |i: usize| color.get(i..i + 1).and_then(|d| channel(&d.repeat(2)));
            Some((digit(0), digit(1), digit(2), Some(255)))
        }
        6 | 8 => {
            let pair = |i: usize| color.get(i..i + 2).and_then(channel);
            let alpha = if color.len() == 8 { pair(6) } else { Some(255) };
            Some((pair(0), pair(2), pair(4), alpha))
        }
        _ => None,
    };

    match parsed {
        Some((Some(r), Some(g), Some(b), Some(a))) => rgb_to_hsla(r, g, b, a),
        _ => rgb_to_hsla(0, 0, 0, 255),
    }
}

/// Convert a highlighter color to Hsla
pub fn from_color(color: Color) -> Hsla {
    rgb_to_hsla(color.r, color.g, color.b, color.a)
}

/// Convert RGB to HSLA
fn rgb_to_hsla(r: u8, g: u8, b: u8, a: u8) -> Hsla {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let a = a as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic
        return Hsla { h: 0.0, s: 0.0, l, a };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        let h = (g - b) / d;
        if g < b { h + 6.0 } else { h }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsla { h: h / 6.0, s, l, a }
}

/// Set the alpha of a color
pub fn with_alpha(color: Hsla, alpha: f32) -> Hsla {
    Hsla { a: alpha, ..color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let white = hex("#ffffff");
        assert!((white.l - 1.0).abs() < 0.01);

        let black = hex("#000000");
        assert!((black.l - 0.0).abs() < 0.01);

        let red = hex("#ff0000");
        assert!((red.h - 0.0).abs() < 0.01);
        assert!((red.s - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_short_and_alpha_hex() {
        let white = hex("#fff");
        assert!((white.l - 1.0).abs() < 0.01);

        let translucent = hex("#00000080");
        assert!((translucent.a - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn test_invalid_hex_is_black() {
        let bad = hex("#zzzzzz");
        assert_eq!(bad.l, 0.0);
        assert_eq!(bad.a, 1.0);

        // Multi-byte input must not panic on slicing
        let bad = hex("#ééé");
        assert_eq!(bad.l, 0.0);
    }

    #[test]
    fn test_from_color_matches_hex() {
        let blue = from_color(Color { r: 0x3b, g: 0x7d, b: 0xd8, a: 0xff });
        let expected = hex("#3b7dd8");
        assert!((blue.h - expected.h).abs() < 0.001);
        assert!((blue.l - expected.l).abs() < 0.001);
    }
}
