use crate::theme::{Scale, ScaleEntry, Theme};

/// Whether raw text reads as a CSS color literal: hex, a color function,
/// or a recognized keyword.
pub fn is_color_like(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    raw.starts_with('#')
        || lower.starts_with("rgb(")
        || lower.starts_with("rgba(")
        || lower.starts_with("hsl(")
        || lower.starts_with("hsla(")
        || named_css_color(&lower).is_some()
}

/// Whether `value` denotes a color at all: a color literal, or a reference
/// into the theme's `colors` scale (`red-500`, `black`, a bare family name).
pub fn is_color(value: &str, theme: &Theme) -> bool {
    if value.is_empty() {
        return false;
    }
    if is_color_like(value) {
        return true;
    }
    let Some(colors) = theme.scale("colors") else {
        return false;
    };
    match value.split_once('-') {
        Some((family, shade)) => match colors.get(family) {
            Some(ScaleEntry::Shades(shades)) => shades.contains_key(shade),
            _ => false,
        },
        None => colors.contains_key(value),
    }
}

/// Computes a canonical lowercase hex value (`#rrggbb` or `#rrggbbaa`) from
/// arbitrary color text. Returns `None` for malformed input.
pub fn hex_from_string(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(digits) = trimmed.strip_prefix('#') {
        return hex_from_digits(digits);
    }
    let lower = trimmed.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, &["rgb", "rgba"]) {
        return hex_from_rgb_args(&args);
    }
    if let Some(args) = function_args(&lower, &["hsl", "hsla"]) {
        return hex_from_hsl_args(&args);
    }
    named_css_color(&lower).map(str::to_string)
}

/// Snaps a canonical hex value to a theme color name (`red-500`) when the
/// scale contains a matching entry.
pub fn theme_color_from_hex(hex: &str, scale: Option<&Scale>) -> Option<String> {
    let scale = scale?;
    let wanted = hex.to_ascii_lowercase();
    for (name, entry) in scale {
        match entry {
            ScaleEntry::Value(value) => {
                if value.eq_ignore_ascii_case(&wanted) {
                    return Some(name.clone());
                }
            }
            ScaleEntry::Shades(shades) => {
                for (shade, value) in shades {
                    if value.eq_ignore_ascii_case(&wanted) {
                        if shade == "DEFAULT" {
                            return Some(name.clone());
                        }
                        return Some(format!("{}-{}", name, shade));
                    }
                }
            }
        }
    }
    None
}

fn hex_from_digits(digits: &str) -> Option<String> {
    if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match digits.len() {
        3 | 4 => digits
            .chars()
            .flat_map(|ch| [ch, ch])
            .collect::<String>(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

/// Extracts the argument list of `name(...)` for any of the given function
/// names, split on commas or whitespace (both CSS syntaxes are accepted).
fn function_args(lower: &str, names: &[&str]) -> Option<Vec<String>> {
    for name in names {
        let Some(rest) = lower.strip_prefix(name) else {
            continue;
        };
        let Some(inner) = rest.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) else {
            continue;
        };
        let args = inner
            .split(|ch: char| ch == ',' || ch == '/' || ch.is_ascii_whitespace())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        return Some(args);
    }
    None
}

fn hex_from_rgb_args(args: &[String]) -> Option<String> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let r = rgb_channel(&args[0])?;
    let g = rgb_channel(&args[1])?;
    let b = rgb_channel(&args[2])?;
    match args.get(3) {
        Some(alpha) => {
            let a = alpha_channel(alpha)?;
            Some(format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a))
        }
        None => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
    }
}

fn rgb_channel(raw: &str) -> Option<u8> {
    if let Some(percent) = raw.strip_suffix('%') {
        let value: f64 = percent.parse().ok()?;
        if !(0.0..=100.0).contains(&value) {
            return None;
        }
        return Some((value / 100.0 * 255.0).round() as u8);
    }
    let value: f64 = raw.parse().ok()?;
    if !(0.0..=255.0).contains(&value) {
        return None;
    }
    Some(value.round() as u8)
}

fn alpha_channel(raw: &str) -> Option<u8> {
    let value: f64 = match raw.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0,
        None => raw.parse().ok()?,
    };
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    Some((value * 255.0).round() as u8)
}

fn hex_from_hsl_args(args: &[String]) -> Option<String> {
    if args.len() != 3 && args.len() != 4 {
        return None;
    }
    let h: f64 = args[0].trim_end_matches("deg").parse().ok()?;
    let s: f64 = args[1].strip_suffix('%')?.parse().ok()?;
    let l: f64 = args[2].strip_suffix('%')?.parse().ok()?;
    if !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
        return None;
    }
    let (r, g, b) = hsl_to_rgb(h.rem_euclid(360.0), s / 100.0, l / 100.0);
    match args.get(3) {
        Some(alpha) => {
            let a = alpha_channel(alpha)?;
            Some(format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a))
        }
        None => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

fn named_css_color(lower: &str) -> Option<&'static str> {
    let hex = match lower {
        "black" => "#000000",
        "white" => "#ffffff",
        "red" => "#ff0000",
        "lime" => "#00ff00",
        "blue" => "#0000ff",
        "green" => "#008000",
        "yellow" => "#ffff00",
        "cyan" | "aqua" => "#00ffff",
        "magenta" | "fuchsia" => "#ff00ff",
        "gray" | "grey" => "#808080",
        "silver" => "#c0c0c0",
        "maroon" => "#800000",
        "olive" => "#808000",
        "navy" => "#000080",
        "teal" => "#008080",
        "purple" => "#800080",
        "orange" => "#ffa500",
        "rebeccapurple" => "#663399",
        _ => return None,
    };
    Some(hex)
}

#[cfg(test)]
mod tests {
    use super::{hex_from_string, is_color, theme_color_from_hex};
    use crate::theme::default_theme;

    #[test]
    fn short_hex_expands() {
        assert_eq!(hex_from_string("#fff").as_deref(), Some("#ffffff"));
        assert_eq!(hex_from_string("#f0ab").as_deref(), Some("#ff00aabb"));
    }

    #[test]
    fn full_hex_normalizes_case() {
        assert_eq!(hex_from_string("#EF4444").as_deref(), Some("#ef4444"));
    }

    #[test]
    fn rgb_functions_convert() {
        assert_eq!(hex_from_string("rgb(239,68,68)").as_deref(), Some("#ef4444"));
        assert_eq!(
            hex_from_string("rgba(0,0,0,0.5)").as_deref(),
            Some("#00000080")
        );
        assert_eq!(hex_from_string("rgb(255 0 0)").as_deref(), Some("#ff0000"));
    }

    #[test]
    fn hsl_functions_convert() {
        assert_eq!(hex_from_string("hsl(0,100%,50%)").as_deref(), Some("#ff0000"));
        assert_eq!(
            hex_from_string("hsl(120,100%,25%)").as_deref(),
            Some("#008000")
        );
    }

    #[test]
    fn css_keywords_convert() {
        assert_eq!(hex_from_string("rebeccapurple").as_deref(), Some("#663399"));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(hex_from_string("not-a-color"), None);
        assert_eq!(hex_from_string("#12"), None);
        assert_eq!(hex_from_string("#gggggg"), None);
        assert_eq!(hex_from_string("rgb(300,0,0)"), None);
        assert_eq!(hex_from_string(""), None);
    }

    #[test]
    fn snaps_hex_to_theme_name() {
        let theme = default_theme();
        assert_eq!(
            theme_color_from_hex("#ef4444", theme.scale("colors")).as_deref(),
            Some("red-500")
        );
        assert_eq!(
            theme_color_from_hex("#000000", theme.scale("colors")).as_deref(),
            Some("black")
        );
        assert_eq!(theme_color_from_hex("#123456", theme.scale("colors")), None);
        assert_eq!(theme_color_from_hex("#ef4444", None), None);
    }

    #[test]
    fn theme_references_are_colors() {
        let theme = default_theme();
        assert!(is_color("red-500", theme));
        assert!(is_color("black", theme));
        assert!(is_color("#ef4444", theme));
        assert!(!is_color("red-999", theme));
        assert!(!is_color("10px", theme));
        assert!(!is_color("", theme));
    }
}
