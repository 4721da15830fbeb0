/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Parse a `#rrggbb` hex color into components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Fill color with alpha applied. Named CSS colors pass through untouched
/// (alpha only applies to hex colors).
pub fn fill_with_alpha(color: &str, alpha: f64) -> String {
    match hex_to_rgb(color) {
        Some((r, g, b)) => rgba_css(r, g, b, alpha),
        None => color.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_with_alpha, hex_to_rgb};

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_rgb("#6b3c34"), Some((0x6b, 0x3c, 0x34)));
        assert_eq!(hex_to_rgb("#ff7800"), Some((255, 120, 0)));
        assert_eq!(hex_to_rgb("salmon"), None);
        assert_eq!(hex_to_rgb("#abc"), None);
    }

    #[test]
    fn alpha_applies_to_hex_only() {
        assert_eq!(fill_with_alpha("#ff7800", 0.6), "rgba(255,120,0,0.6)");
        assert_eq!(fill_with_alpha("salmon", 0.6), "salmon");
    }
}
