use crate::color::is_color_like;
use crate::plugins::{FunctionalPlugin, ValueKind};
use crate::theme::{Scale, Theme};
use serde::Serialize;

/// Resolved value descriptor attached to a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Value {
    pub raw: String,
    pub value: String,
    pub class: String,
    pub kind: ValueKind,
}

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "ch", "ex", "vh", "vw", "vmin", "vmax", "svh", "svw", "dvh", "dvw", "pt",
    "pc", "cm", "mm", "in", "ms", "s", "deg",
];

/// Infers the kind of a raw arbitrary value, restricted to the kinds the
/// candidate plugins declare. Unmatched text yields `None`.
pub fn infer_value_kind(raw: &str, candidates: &[ValueKind]) -> Option<ValueKind> {
    const PRECEDENCE: &[ValueKind] = &[
        ValueKind::Color,
        ValueKind::Url,
        ValueKind::Length,
        ValueKind::Percentage,
        ValueKind::Number,
    ];
    if let Some(kind) = PRECEDENCE
        .iter()
        .copied()
        .find(|kind| candidates.contains(kind) && matches_kind(raw, *kind))
    {
        return Some(kind);
    }
    // A bare word like `tomato` or `not-a-color` is read as a color attempt
    // when a color plugin competes for this root; hex computation decides
    // downstream whether it is valid.
    if candidates.contains(&ValueKind::Color)
        && !raw.is_empty()
        && raw.chars().all(|ch| ch.is_ascii_alphabetic() || ch == '-')
    {
        return Some(ValueKind::Color);
    }
    None
}

fn matches_kind(raw: &str, kind: ValueKind) -> bool {
    match kind {
        ValueKind::Color => is_color_like(raw),
        ValueKind::Url => {
            let lower = raw.to_ascii_lowercase();
            lower.starts_with("url(") || lower.starts_with("image(")
        }
        ValueKind::Length => is_length(raw),
        ValueKind::Percentage => raw
            .strip_suffix('%')
            .is_some_and(|number| number.parse::<f64>().is_ok()),
        ValueKind::Number => raw.parse::<f64>().is_ok(),
        ValueKind::Named => false,
    }
}

fn is_length(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("calc(") || lower.starts_with("var(") || lower.starts_with("min(")
        || lower.starts_with("max(") || lower.starts_with("clamp(")
    {
        return true;
    }
    if raw.ends_with('%') && matches_kind(raw, ValueKind::Percentage) {
        return true;
    }
    LENGTH_UNITS.iter().any(|unit| {
        lower
            .strip_suffix(unit)
            .is_some_and(|number| !number.is_empty() && number.parse::<f64>().is_ok())
    })
}

/// Coerces a scale value into a [`Value`] via checked theme lookup.
/// `value` is the scale key (`red-500`, `4`, `DEFAULT`); `None` means the
/// key is not present in the plugin's scale.
pub fn resolve_value(value: &str, plugin: &FunctionalPlugin, theme: &Theme) -> Option<Value> {
    let resolved = theme.lookup(&plugin.scale_key, value)?;
    Some(Value {
        raw: value.to_string(),
        value: resolved.to_string(),
        class: plugin.class.clone(),
        kind: plugin.kind,
    })
}

/// Decodes bracketed arbitrary text: underscores become spaces, `\_` stays
/// a literal underscore, and `url(...)` contents are preserved verbatim.
pub fn decode_arbitrary_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut idx = 0usize;
    let mut paren_depth = 0usize;
    let mut url_depth: Option<usize> = None;

    while idx < raw.len() {
        if starts_with_url_function(raw, idx) {
            out.push_str("url(");
            idx += "url(".len();
            paren_depth += 1;
            url_depth = Some(paren_depth);
            continue;
        }

        let Some(ch) = raw[idx..].chars().next() else {
            break;
        };
        let size = ch.len_utf8();

        if ch == '\\' {
            let next_idx = idx + size;
            if let Some(next) = raw[next_idx..].chars().next() {
                if next == '_' {
                    out.push('_');
                } else {
                    out.push('\\');
                    out.push(next);
                }
                idx = next_idx + next.len_utf8();
                continue;
            }
            out.push('\\');
            idx += size;
            continue;
        }

        match ch {
            '(' => paren_depth += 1,
            ')' => {
                if url_depth == Some(paren_depth) {
                    url_depth = None;
                }
                paren_depth = paren_depth.saturating_sub(1);
            }
            _ => {}
        }

        if ch == '_' && url_depth.is_none() {
            out.push(' ');
        } else {
            out.push(ch);
        }
        idx += size;
    }

    out
}

fn starts_with_url_function(raw: &str, idx: usize) -> bool {
    raw[idx..]
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("url("))
}

/// Normalizes a modifier segment into an alpha value: bracketed literals
/// are decoded, known opacity keys resolve through the scale, anything else
/// passes through untouched.
pub fn build_modifier(segment: &str, opacity: Option<&Scale>) -> String {
    if let Some(inner) = segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return decode_arbitrary_value(inner);
    }
    if let Some(scale) = opacity {
        if let Some(crate::theme::ScaleEntry::Value(value)) = scale.get(segment) {
            return value.clone();
        }
    }
    segment.to_string()
}

#[cfg(test)]
mod tests {
    use super::{build_modifier, decode_arbitrary_value, infer_value_kind, resolve_value};
    use crate::plugins::{FunctionalPlugin, ValueKind};
    use crate::theme::default_theme;

    #[test]
    fn infers_among_candidate_kinds_only() {
        let candidates = [ValueKind::Color, ValueKind::Length];
        assert_eq!(infer_value_kind("#fff", &candidates), Some(ValueKind::Color));
        assert_eq!(infer_value_kind("2px", &candidates), Some(ValueKind::Length));
        assert_eq!(infer_value_kind("2.5", &candidates), None);
        assert_eq!(
            infer_value_kind("not-a-color", &candidates),
            Some(ValueKind::Color)
        );
        assert_eq!(infer_value_kind("not-a-color", &[ValueKind::Length]), None);
        assert_eq!(
            infer_value_kind("2.5", &[ValueKind::Number]),
            Some(ValueKind::Number)
        );
    }

    #[test]
    fn color_wins_over_length_on_ties() {
        let candidates = [ValueKind::Length, ValueKind::Color];
        assert_eq!(
            infer_value_kind("rgb(0,0,0)", &candidates),
            Some(ValueKind::Color)
        );
    }

    #[test]
    fn calc_counts_as_length() {
        assert_eq!(
            infer_value_kind("calc(100%-2rem)", &[ValueKind::Length]),
            Some(ValueKind::Length)
        );
    }

    #[test]
    fn url_values_are_recognized() {
        assert_eq!(
            infer_value_kind("url(https://a/b.png)", &[ValueKind::Url, ValueKind::Color]),
            Some(ValueKind::Url)
        );
    }

    #[test]
    fn underscores_decode_to_spaces() {
        assert_eq!(decode_arbitrary_value("1fr_auto_1fr"), "1fr auto 1fr");
        assert_eq!(decode_arbitrary_value("hello\\_world"), "hello_world");
    }

    #[test]
    fn url_contents_keep_underscores() {
        assert_eq!(
            decode_arbitrary_value("url(/my_image.png)"),
            "url(/my_image.png)"
        );
        assert_eq!(
            decode_arbitrary_value("url(/a_b.png)_no-repeat"),
            "url(/a_b.png) no-repeat"
        );
    }

    #[test]
    fn modifier_resolves_through_opacity_scale() {
        let theme = default_theme();
        assert_eq!(build_modifier("50", theme.scale("opacity")), "0.5");
        assert_eq!(build_modifier("[0.35]", theme.scale("opacity")), "0.35");
        assert_eq!(build_modifier("37", theme.scale("opacity")), "37");
    }

    #[test]
    fn coercion_uses_checked_lookup() {
        let theme = default_theme();
        let spacing = FunctionalPlugin {
            kind: ValueKind::Length,
            property: "margin-top".to_string(),
            scale_key: "spacing".to_string(),
            class: "mt".to_string(),
        };
        let value = resolve_value("4", &spacing, theme).expect("spacing 4 exists");
        assert_eq!(value.value, "1rem");
        assert_eq!(value.raw, "4");
        assert!(resolve_value("999", &spacing, theme).is_none());

        let color = FunctionalPlugin {
            kind: ValueKind::Color,
            property: "background-color".to_string(),
            scale_key: "colors".to_string(),
            class: "bg".to_string(),
        };
        let value = resolve_value("red-500", &color, theme).expect("red-500 exists");
        assert_eq!(value.value, "#ef4444");
    }
}
