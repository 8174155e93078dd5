use crate::config::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One entry in a theme scale: either a single literal value or a nested
/// shade table (color families).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScaleEntry {
    Value(String),
    Shades(BTreeMap<String, String>),
}

pub type Scale = BTreeMap<String, ScaleEntry>;

/// Fully-resolved theme: named scales plus the responsive breakpoint table.
/// Read-only during parsing; every lookup is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub scales: BTreeMap<String, Scale>,
    pub screens: BTreeMap<String, String>,
}

impl Theme {
    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.get(name)
    }

    /// Whether `key` names an entry in the given scale. Missing scales
    /// report `false` rather than panicking.
    pub fn has_key(&self, scale: &str, key: &str) -> bool {
        self.scale(scale).is_some_and(|scale| scale.contains_key(key))
    }

    /// Resolves a nested reference like `red-500` (or a single-value key
    /// like `black`) inside one scale. A bare family name falls back to its
    /// `DEFAULT` shade.
    pub fn lookup<'a>(&'a self, scale: &str, key: &str) -> Option<&'a str> {
        let scale = self.scale(scale)?;
        if let Some(entry) = scale.get(key) {
            return match entry {
                ScaleEntry::Value(value) => Some(value),
                ScaleEntry::Shades(shades) => shades.get("DEFAULT").map(String::as_str),
            };
        }
        let (family, shade) = key.split_once('-')?;
        match scale.get(family)? {
            ScaleEntry::Shades(shades) => shades.get(shade).map(String::as_str),
            ScaleEntry::Value(_) => None,
        }
    }

    /// Merges optional user configuration over the built-in theme. Whole
    /// color families are replaced; flat scales are overridden per key.
    pub fn resolve(config: Option<&Config>) -> Theme {
        let mut theme = default_theme().clone();
        let Some(config) = config else {
            return theme;
        };

        for (family, shades) in &config.theme.colors {
            let entry = if shades.len() == 1 && shades.contains_key("DEFAULT") {
                ScaleEntry::Value(shades["DEFAULT"].clone())
            } else {
                ScaleEntry::Shades(shades.clone())
            };
            theme
                .scales
                .entry("colors".to_string())
                .or_default()
                .insert(family.clone(), entry);
        }
        merge_flat(&mut theme, "spacing", &config.theme.spacing);
        merge_flat(&mut theme, "opacity", &config.theme.opacity);
        for (name, width) in &config.theme.screens {
            theme.screens.insert(name.clone(), width.clone());
        }
        theme
    }
}

fn merge_flat(theme: &mut Theme, scale: &str, overrides: &BTreeMap<String, String>) {
    if overrides.is_empty() {
        return;
    }
    let scale = theme.scales.entry(scale.to_string()).or_default();
    for (key, value) in overrides {
        scale.insert(key.clone(), ScaleEntry::Value(value.clone()));
    }
}

pub fn default_theme() -> &'static Theme {
    static DEFAULT_THEME: OnceLock<Theme> = OnceLock::new();
    DEFAULT_THEME.get_or_init(build_default_theme)
}

fn build_default_theme() -> Theme {
    let mut scales = BTreeMap::new();
    scales.insert("colors".to_string(), default_colors());
    scales.insert("spacing".to_string(), default_spacing());
    scales.insert("opacity".to_string(), default_opacity());
    scales.insert("width".to_string(), default_width());
    scales.insert("height".to_string(), default_height());
    scales.insert("radius".to_string(), default_radius());
    scales.insert("text".to_string(), default_text_sizes());
    scales.insert("leading".to_string(), default_leading());
    scales.insert("tracking".to_string(), default_tracking());
    scales.insert("border-width".to_string(), default_border_width());
    scales.insert("z".to_string(), default_z_index());
    scales.insert("duration".to_string(), default_duration());
    scales.insert("scale".to_string(), default_scale_factors());
    scales.insert("background-image".to_string(), default_background_image());

    Theme {
        scales,
        screens: default_screens(),
    }
}

fn flat(entries: &[(&str, &str)]) -> Scale {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), ScaleEntry::Value((*value).to_string())))
        .collect()
}

fn shades(entries: &[(&str, &str)]) -> ScaleEntry {
    ScaleEntry::Shades(
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect(),
    )
}

fn default_screens() -> BTreeMap<String, String> {
    [
        ("sm", "640px"),
        ("md", "768px"),
        ("lg", "1024px"),
        ("xl", "1280px"),
        ("2xl", "1536px"),
    ]
    .iter()
    .map(|(name, width)| ((*name).to_string(), (*width).to_string()))
    .collect()
}

fn default_colors() -> Scale {
    let mut colors = Scale::new();
    colors.insert("inherit".to_string(), ScaleEntry::Value("inherit".to_string()));
    colors.insert(
        "current".to_string(),
        ScaleEntry::Value("currentColor".to_string()),
    );
    colors.insert(
        "transparent".to_string(),
        ScaleEntry::Value("transparent".to_string()),
    );
    colors.insert("black".to_string(), ScaleEntry::Value("#000000".to_string()));
    colors.insert("white".to_string(), ScaleEntry::Value("#ffffff".to_string()));

    colors.insert(
        "slate".to_string(),
        shades(&[
            ("50", "#f8fafc"),
            ("100", "#f1f5f9"),
            ("200", "#e2e8f0"),
            ("300", "#cbd5e1"),
            ("400", "#94a3b8"),
            ("500", "#64748b"),
            ("600", "#475569"),
            ("700", "#334155"),
            ("800", "#1e293b"),
            ("900", "#0f172a"),
            ("950", "#020617"),
        ]),
    );
    colors.insert(
        "gray".to_string(),
        shades(&[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
            ("950", "#030712"),
        ]),
    );
    colors.insert(
        "red".to_string(),
        shades(&[
            ("50", "#fef2f2"),
            ("100", "#fee2e2"),
            ("200", "#fecaca"),
            ("300", "#fca5a5"),
            ("400", "#f87171"),
            ("500", "#ef4444"),
            ("600", "#dc2626"),
            ("700", "#b91c1c"),
            ("800", "#991b1b"),
            ("900", "#7f1d1d"),
            ("950", "#450a0a"),
        ]),
    );
    colors.insert(
        "orange".to_string(),
        shades(&[
            ("50", "#fff7ed"),
            ("100", "#ffedd5"),
            ("200", "#fed7aa"),
            ("300", "#fdba74"),
            ("400", "#fb923c"),
            ("500", "#f97316"),
            ("600", "#ea580c"),
            ("700", "#c2410c"),
            ("800", "#9a3412"),
            ("900", "#7c2d12"),
            ("950", "#431407"),
        ]),
    );
    colors.insert(
        "yellow".to_string(),
        shades(&[
            ("50", "#fefce8"),
            ("100", "#fef9c3"),
            ("200", "#fef08a"),
            ("300", "#fde047"),
            ("400", "#facc15"),
            ("500", "#eab308"),
            ("600", "#ca8a04"),
            ("700", "#a16207"),
            ("800", "#854d0e"),
            ("900", "#713f12"),
            ("950", "#422006"),
        ]),
    );
    colors.insert(
        "green".to_string(),
        shades(&[
            ("50", "#f0fdf4"),
            ("100", "#dcfce7"),
            ("200", "#bbf7d0"),
            ("300", "#86efac"),
            ("400", "#4ade80"),
            ("500", "#22c55e"),
            ("600", "#16a34a"),
            ("700", "#15803d"),
            ("800", "#166534"),
            ("900", "#14532d"),
            ("950", "#052e16"),
        ]),
    );
    colors.insert(
        "teal".to_string(),
        shades(&[
            ("50", "#f0fdfa"),
            ("100", "#ccfbf1"),
            ("200", "#99f6e4"),
            ("300", "#5eead4"),
            ("400", "#2dd4bf"),
            ("500", "#14b8a6"),
            ("600", "#0d9488"),
            ("700", "#0f766e"),
            ("800", "#115e59"),
            ("900", "#134e4a"),
            ("950", "#042f2e"),
        ]),
    );
    colors.insert(
        "blue".to_string(),
        shades(&[
            ("50", "#eff6ff"),
            ("100", "#dbeafe"),
            ("200", "#bfdbfe"),
            ("300", "#93c5fd"),
            ("400", "#60a5fa"),
            ("500", "#3b82f6"),
            ("600", "#2563eb"),
            ("700", "#1d4ed8"),
            ("800", "#1e40af"),
            ("900", "#1e3a8a"),
            ("950", "#172554"),
        ]),
    );
    colors.insert(
        "indigo".to_string(),
        shades(&[
            ("50", "#eef2ff"),
            ("100", "#e0e7ff"),
            ("200", "#c7d2fe"),
            ("300", "#a5b4fc"),
            ("400", "#818cf8"),
            ("500", "#6366f1"),
            ("600", "#4f46e5"),
            ("700", "#4338ca"),
            ("800", "#3730a3"),
            ("900", "#312e81"),
            ("950", "#1e1b4b"),
        ]),
    );
    colors.insert(
        "purple".to_string(),
        shades(&[
            ("50", "#faf5ff"),
            ("100", "#f3e8ff"),
            ("200", "#e9d5ff"),
            ("300", "#d8b4fe"),
            ("400", "#c084fc"),
            ("500", "#a855f7"),
            ("600", "#9333ea"),
            ("700", "#7e22ce"),
            ("800", "#6b21a8"),
            ("900", "#581c87"),
            ("950", "#3b0764"),
        ]),
    );
    colors.insert(
        "pink".to_string(),
        shades(&[
            ("50", "#fdf2f8"),
            ("100", "#fce7f3"),
            ("200", "#fbcfe8"),
            ("300", "#f9a8d4"),
            ("400", "#f472b6"),
            ("500", "#ec4899"),
            ("600", "#db2777"),
            ("700", "#be185d"),
            ("800", "#9d174d"),
            ("900", "#831843"),
            ("950", "#500724"),
        ]),
    );
    colors
}

fn default_spacing() -> Scale {
    let mut spacing = flat(&[
        ("0", "0px"),
        ("px", "1px"),
        ("0.5", "0.125rem"),
        ("1", "0.25rem"),
        ("1.5", "0.375rem"),
        ("2", "0.5rem"),
        ("2.5", "0.625rem"),
        ("3", "0.75rem"),
        ("3.5", "0.875rem"),
        ("4", "1rem"),
        ("5", "1.25rem"),
        ("6", "1.5rem"),
        ("7", "1.75rem"),
        ("8", "2rem"),
        ("9", "2.25rem"),
        ("10", "2.5rem"),
        ("11", "2.75rem"),
        ("12", "3rem"),
        ("14", "3.5rem"),
        ("16", "4rem"),
        ("20", "5rem"),
        ("24", "6rem"),
        ("28", "7rem"),
        ("32", "8rem"),
        ("36", "9rem"),
        ("40", "10rem"),
        ("44", "11rem"),
        ("48", "12rem"),
        ("52", "13rem"),
        ("56", "14rem"),
        ("60", "15rem"),
        ("64", "16rem"),
        ("72", "18rem"),
        ("80", "20rem"),
        ("96", "24rem"),
    ]);
    spacing.insert("auto".to_string(), ScaleEntry::Value("auto".to_string()));
    spacing
}

fn default_opacity() -> Scale {
    flat(&[
        ("0", "0"),
        ("5", "0.05"),
        ("10", "0.1"),
        ("15", "0.15"),
        ("20", "0.2"),
        ("25", "0.25"),
        ("30", "0.3"),
        ("35", "0.35"),
        ("40", "0.4"),
        ("45", "0.45"),
        ("50", "0.5"),
        ("55", "0.55"),
        ("60", "0.6"),
        ("65", "0.65"),
        ("70", "0.7"),
        ("75", "0.75"),
        ("80", "0.8"),
        ("85", "0.85"),
        ("90", "0.9"),
        ("95", "0.95"),
        ("100", "1"),
    ])
}

fn default_width() -> Scale {
    let mut width = default_spacing();
    for (key, value) in [
        ("full", "100%"),
        ("screen", "100vw"),
        ("min", "min-content"),
        ("max", "max-content"),
        ("fit", "fit-content"),
        ("1/2", "50%"),
        ("1/3", "33.333333%"),
        ("2/3", "66.666667%"),
        ("1/4", "25%"),
        ("3/4", "75%"),
        ("1/5", "20%"),
        ("2/5", "40%"),
        ("3/5", "60%"),
        ("4/5", "80%"),
    ] {
        width.insert(key.to_string(), ScaleEntry::Value(value.to_string()));
    }
    width
}

fn default_height() -> Scale {
    let mut height = default_width();
    height.insert("screen".to_string(), ScaleEntry::Value("100vh".to_string()));
    height
}

fn default_radius() -> Scale {
    flat(&[
        ("none", "0px"),
        ("sm", "0.125rem"),
        ("DEFAULT", "0.25rem"),
        ("md", "0.375rem"),
        ("lg", "0.5rem"),
        ("xl", "0.75rem"),
        ("2xl", "1rem"),
        ("3xl", "1.5rem"),
        ("full", "9999px"),
    ])
}

fn default_text_sizes() -> Scale {
    flat(&[
        ("xs", "0.75rem"),
        ("sm", "0.875rem"),
        ("base", "1rem"),
        ("lg", "1.125rem"),
        ("xl", "1.25rem"),
        ("2xl", "1.5rem"),
        ("3xl", "1.875rem"),
        ("4xl", "2.25rem"),
        ("5xl", "3rem"),
        ("6xl", "3.75rem"),
        ("7xl", "4.5rem"),
        ("8xl", "6rem"),
        ("9xl", "8rem"),
    ])
}

fn default_leading() -> Scale {
    flat(&[
        ("none", "1"),
        ("tight", "1.25"),
        ("snug", "1.375"),
        ("normal", "1.5"),
        ("relaxed", "1.625"),
        ("loose", "2"),
        ("3", ".75rem"),
        ("4", "1rem"),
        ("5", "1.25rem"),
        ("6", "1.5rem"),
        ("7", "1.75rem"),
        ("8", "2rem"),
        ("9", "2.25rem"),
        ("10", "2.5rem"),
    ])
}

fn default_tracking() -> Scale {
    flat(&[
        ("tighter", "-0.05em"),
        ("tight", "-0.025em"),
        ("normal", "0em"),
        ("wide", "0.025em"),
        ("wider", "0.05em"),
        ("widest", "0.1em"),
    ])
}

fn default_border_width() -> Scale {
    flat(&[
        ("DEFAULT", "1px"),
        ("0", "0px"),
        ("2", "2px"),
        ("4", "4px"),
        ("8", "8px"),
    ])
}

fn default_z_index() -> Scale {
    flat(&[
        ("0", "0"),
        ("10", "10"),
        ("20", "20"),
        ("30", "30"),
        ("40", "40"),
        ("50", "50"),
        ("auto", "auto"),
    ])
}

fn default_duration() -> Scale {
    flat(&[
        ("DEFAULT", "150ms"),
        ("75", "75ms"),
        ("100", "100ms"),
        ("150", "150ms"),
        ("200", "200ms"),
        ("300", "300ms"),
        ("500", "500ms"),
        ("700", "700ms"),
        ("1000", "1000ms"),
    ])
}

fn default_scale_factors() -> Scale {
    flat(&[
        ("0", "0"),
        ("50", ".5"),
        ("75", ".75"),
        ("90", ".9"),
        ("95", ".95"),
        ("100", "1"),
        ("105", "1.05"),
        ("110", "1.1"),
        ("125", "1.25"),
        ("150", "1.5"),
    ])
}

fn default_background_image() -> Scale {
    flat(&[("none", "none")])
}

#[cfg(test)]
mod tests {
    use super::{default_theme, ScaleEntry, Theme};
    use crate::config::Config;
    use std::collections::BTreeMap;

    #[test]
    fn checked_lookup_resolves_shades() {
        let theme = default_theme();
        assert_eq!(theme.lookup("colors", "red-500"), Some("#ef4444"));
        assert_eq!(theme.lookup("colors", "black"), Some("#000000"));
        assert_eq!(theme.lookup("colors", "red-999"), None);
        assert_eq!(theme.lookup("colors", "nope-500"), None);
    }

    #[test]
    fn missing_scale_is_not_an_error() {
        let theme = default_theme();
        assert!(!theme.has_key("no-such-scale", "anything"));
        assert_eq!(theme.lookup("no-such-scale", "anything"), None);
    }

    #[test]
    fn resolve_without_config_matches_default() {
        assert_eq!(&Theme::resolve(None), default_theme());
    }

    #[test]
    fn config_overrides_replace_color_families() {
        let mut config = Config::default();
        let mut brand = BTreeMap::new();
        brand.insert("500".to_string(), "#123456".to_string());
        config.theme.colors.insert("brand".to_string(), brand);
        config
            .theme
            .screens
            .insert("3xl".to_string(), "1920px".to_string());

        let theme = Theme::resolve(Some(&config));
        assert_eq!(theme.lookup("colors", "brand-500"), Some("#123456"));
        assert_eq!(theme.screens.get("3xl").map(String::as_str), Some("1920px"));
        // untouched defaults survive the merge
        assert_eq!(theme.lookup("colors", "blue-500"), Some("#3b82f6"));
    }

    #[test]
    fn single_value_color_override_uses_default_shade() {
        let mut config = Config::default();
        let mut accent = BTreeMap::new();
        accent.insert("DEFAULT".to_string(), "#ff00ff".to_string());
        config.theme.colors.insert("accent".to_string(), accent);

        let theme = Theme::resolve(Some(&config));
        assert_eq!(theme.lookup("colors", "accent"), Some("#ff00ff"));
        assert!(matches!(
            theme.scale("colors").and_then(|scale| scale.get("accent")),
            Some(ScaleEntry::Value(_))
        ));
    }
}
