use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

pub const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);

/// CSS/matplotlib colour names used by the region table and the CLI.
const NAMED: &[(&str, Srgb<u8>)] = &[
    ("black", BLACK),
    ("white", Srgb::new(255, 255, 255)),
    ("blue", Srgb::new(0, 0, 255)),
    ("cyan", Srgb::new(0, 255, 255)),
    ("red", Srgb::new(255, 0, 0)),
    ("purple", Srgb::new(128, 0, 128)),
    ("pink", Srgb::new(255, 192, 203)),
    ("orange", Srgb::new(255, 165, 0)),
    ("green", Srgb::new(0, 128, 0)),
    ("brown", Srgb::new(165, 42, 42)),
    ("gray", Srgb::new(128, 128, 128)),
    ("grey", Srgb::new(128, 128, 128)),
    ("gold", Srgb::new(255, 215, 0)),
    ("seagreen", Srgb::new(46, 139, 87)),
    ("indigo", Srgb::new(75, 0, 130)),
];

/// Look up a colour by name (case-insensitive) or `#rrggbb` hex.
pub fn named(name: &str) -> Option<Srgb<u8>> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

fn parse_hex(hex: &str) -> Option<Srgb<u8>> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Srgb::new(channel(0)?, channel(2)?, channel(4)?))
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_colour_names_resolve() {
        for name in [
            "blue", "cyan", "red", "purple", "pink", "orange", "green", "brown", "gray", "gold",
            "seagreen", "indigo",
        ] {
            assert!(named(name).is_some(), "{name} should resolve");
        }
        assert_eq!(named("SeaGreen"), Some(Srgb::new(46, 139, 87)));
        assert_eq!(named("chartreuse-ish"), None);
    }

    #[test]
    fn hex_colours_parse() {
        assert_eq!(named("#ff8000"), Some(Srgb::new(255, 128, 0)));
        assert_eq!(named("#ff80"), None);
        assert_eq!(named("#gg0000"), None);
    }

    #[test]
    fn palette_has_distinct_entries() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }
}
