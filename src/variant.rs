use serde::Serialize;
use std::collections::BTreeMap;

/// A parsed variant prefix: state pseudo-class, responsive breakpoint, or
/// media condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub raw: String,
    pub kind: VariantKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    State { selector: String },
    Breakpoint { min_width: String },
    Media { query: String },
}

/// Parses one raw variant string against the breakpoint table. Unrecognized
/// variants yield `None`; the caller drops them silently.
pub fn parse_variant(raw: &str, screens: &BTreeMap<String, String>) -> Option<Variant> {
    if let Some(selector) = state_selector(raw) {
        return Some(Variant {
            raw: raw.to_string(),
            kind: VariantKind::State {
                selector: selector.to_string(),
            },
        });
    }
    if let Some(query) = media_query(raw) {
        return Some(Variant {
            raw: raw.to_string(),
            kind: VariantKind::Media {
                query: query.to_string(),
            },
        });
    }
    screens.get(raw).map(|min_width| Variant {
        raw: raw.to_string(),
        kind: VariantKind::Breakpoint {
            min_width: min_width.clone(),
        },
    })
}

fn state_selector(raw: &str) -> Option<&'static str> {
    let selector = match raw {
        "hover" => ":hover",
        "focus" => ":focus",
        "focus-within" => ":focus-within",
        "focus-visible" => ":focus-visible",
        "active" => ":active",
        "visited" => ":visited",
        "target" => ":target",
        "disabled" => ":disabled",
        "enabled" => ":enabled",
        "checked" => ":checked",
        "required" => ":required",
        "first" => ":first-child",
        "last" => ":last-child",
        "only" => ":only-child",
        "odd" => ":nth-child(odd)",
        "even" => ":nth-child(even)",
        "empty" => ":empty",
        "first-of-type" => ":first-of-type",
        "last-of-type" => ":last-of-type",
        _ => return None,
    };
    Some(selector)
}

fn media_query(raw: &str) -> Option<&'static str> {
    let query = match raw {
        "dark" => "(prefers-color-scheme: dark)",
        "motion-safe" => "(prefers-reduced-motion: no-preference)",
        "motion-reduce" => "(prefers-reduced-motion: reduce)",
        "print" => "print",
        _ => return None,
    };
    Some(query)
}

#[cfg(test)]
mod tests {
    use super::{parse_variant, VariantKind};
    use crate::theme::default_theme;

    #[test]
    fn recognizes_state_variants() {
        let screens = &default_theme().screens;
        let variant = parse_variant("hover", screens).expect("hover is known");
        assert_eq!(
            variant.kind,
            VariantKind::State {
                selector: ":hover".to_string()
            }
        );
    }

    #[test]
    fn resolves_breakpoints_against_screens() {
        let screens = &default_theme().screens;
        let variant = parse_variant("md", screens).expect("md is a screen");
        assert_eq!(
            variant.kind,
            VariantKind::Breakpoint {
                min_width: "768px".to_string()
            }
        );
    }

    #[test]
    fn dark_is_a_media_variant() {
        let screens = &default_theme().screens;
        let variant = parse_variant("dark", screens).expect("dark is known");
        assert!(matches!(variant.kind, VariantKind::Media { .. }));
    }

    #[test]
    fn unknown_variants_are_dropped() {
        let screens = &default_theme().screens;
        assert!(parse_variant("bogus", screens).is_none());
    }
}
