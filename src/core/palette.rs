/// The original dashboard palette. Generated colors extend it, never replace
/// it, so the first six categories keep their identity.
pub const BASE_PALETTE: [&str; 6] =
    ["#00c48c", "#3b82f6", "#f59e0b", "#8b5cf6", "#ff6b95", "#6b7280"];

// Tuned to match the perceived brightness of the base palette.
const GENERATED_SATURATION: f64 = 66.0;
const GENERATED_LIGHTNESS: f64 = 56.0;

/// Deterministic palette for `n` categories: the base palette verbatim,
/// extended with evenly hue-spaced HSL colors. The hue offset derives from
/// the first base color so the generated set does not collide with it.
#[must_use]
pub fn colors_for(n: usize) -> Vec<String> {
    let mut colors: Vec<String> = BASE_PALETTE.iter().take(n).map(ToString::to_string).collect();
    if n <= BASE_PALETTE.len() {
        return colors;
    }

    let offset = u32::from_str_radix(BASE_PALETTE[0].trim_start_matches('#'), 16)
        .map_or(0, |number| number % 360);
    let n_generated = n - BASE_PALETTE.len();
    #[expect(clippy::cast_precision_loss)]
    for index in 0..n_generated {
        let hue =
            (index as f64 * 360.0 / n_generated as f64 + f64::from(offset)) % 360.0;
        colors.push(format!(
            "hsl({}, {GENERATED_SATURATION}%, {GENERATED_LIGHTNESS}%)",
            hue.round()
        ));
    }
    colors
}

/// Darken a palette color by `amount` (0..1). Hex colors darken per channel,
/// `hsl(...)` colors by lightness; anything else passes through unchanged.
#[must_use]
pub fn darken(color: &str, amount: f64) -> String {
    let color = color.trim();
    if let Some((r, g, b)) = parse_hex(color) {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scale = |channel: u8| (f64::from(channel) * (1.0 - amount)).floor().max(0.0) as u8;
        return format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b));
    }
    if let Some((hue, saturation, lightness)) = parse_hsl(color) {
        let lightness = (lightness * (1.0 - amount)).clamp(0.0, 100.0);
        let lightness = (lightness * 100.0).round() / 100.0;
        return format!("hsl({}, {}%, {lightness}%)", hue.round(), saturation.round());
    }
    color.to_owned()
}

/// RGB triple of a palette entry, for terminal styling.
#[must_use]
pub fn to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    parse_hex(color).or_else(|| parse_hsl(color).map(hsl_to_rgb))
}

#[expect(clippy::cast_possible_truncation)]
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.strip_prefix('#')?;
    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|digit| [digit, digit]).collect(),
        6 => digits.to_owned(),
        _ => return None,
    };
    let number = u32::from_str_radix(&expanded, 16).ok()?;
    Some((((number >> 16) & 0xFF) as u8, ((number >> 8) & 0xFF) as u8, (number & 0xFF) as u8))
}

fn parse_hsl(color: &str) -> Option<(f64, f64, f64)> {
    let body = color
        .strip_prefix("hsl(")
        .or_else(|| color.strip_prefix("HSL("))?
        .strip_suffix(')')?;
    let mut components = body
        .split(|character: char| character == ',' || character.is_whitespace())
        .filter(|part| !part.is_empty());
    let hue =
        components.next()?.trim_end_matches("deg").parse().ok()?;
    let saturation = components.next()?.trim_end_matches('%').parse().ok()?;
    let lightness = components.next()?.trim_end_matches('%').parse().ok()?;
    Some((hue, saturation, lightness))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hsl_to_rgb((hue, saturation, lightness): (f64, f64, f64)) -> (u8, u8, u8) {
    let saturation = saturation / 100.0;
    let lightness = lightness / 100.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
    let (r, g, b) = match hue_prime {
        h if h < 1.0 => (chroma, x, 0.0),
        h if h < 2.0 => (x, chroma, 0.0),
        h if h < 3.0 => (0.0, chroma, x),
        h if h < 4.0 => (0.0, x, chroma),
        h if h < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_palette_returned_verbatim() {
        assert_eq!(colors_for(6), BASE_PALETTE.map(str::to_owned).to_vec());
        assert_eq!(colors_for(2), vec!["#00c48c".to_owned(), "#3b82f6".to_owned()]);
    }

    #[test]
    fn test_extension_keeps_base_and_is_deterministic() {
        let colors = colors_for(8);
        assert_eq!(colors.len(), 8);
        assert_eq!(&colors[..6], &colors_for(6)[..]);
        assert!(colors[6].starts_with("hsl("));
        assert!(colors[7].starts_with("hsl("));
        assert_eq!(colors, colors_for(8));
    }

    #[test]
    fn test_generated_hues_are_offset() {
        // 0x00c48c % 360 == 276, so the first generated color starts there.
        assert_eq!(colors_for(7)[6], "hsl(276, 66%, 56%)");
    }

    #[test]
    fn test_darken_hex() {
        assert_eq!(darken("#ffffff", 0.2), "#cccccc");
        assert_eq!(darken("#fff", 0.2), "#cccccc");
        assert_eq!(darken("#000000", 0.5), "#000000");
    }

    #[test]
    fn test_darken_hsl() {
        assert_eq!(darken("hsl(120, 50%, 60%)", 0.2), "hsl(120, 50%, 48%)");
    }

    #[test]
    fn test_darken_passes_unknown_through() {
        assert_eq!(darken("rebeccapurple", 0.2), "rebeccapurple");
    }

    #[test]
    fn test_to_rgb() {
        assert_eq!(to_rgb("#ff0000"), Some((255, 0, 0)));
        assert_eq!(to_rgb("hsl(0, 100%, 50%)"), Some((255, 0, 0)));
        assert_eq!(to_rgb("hsl(120, 100%, 50%)"), Some((0, 255, 0)));
        assert_eq!(to_rgb("nope"), None);
    }
}
