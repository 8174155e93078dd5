use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// The shape of value a functional plugin accepts. `Named` marks values
/// taken verbatim from a scale with no inferred type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Named,
    Color,
    Length,
    Percentage,
    Number,
    Url,
}

/// A complete utility with a fixed property and value, matched on the whole
/// base token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPlugin {
    pub property: String,
    pub value: String,
    pub class: String,
}

/// One interpretation of a functional root. Several plugins may share a
/// root and are told apart by the kind of the trailing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalPlugin {
    pub kind: ValueKind,
    pub property: String,
    pub scale_key: String,
    pub class: String,
}

/// Immutable plugin tables, built once per process and passed by reference
/// into the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRegistry {
    named: BTreeMap<String, NamedPlugin>,
    functional: BTreeMap<String, Vec<FunctionalPlugin>>,
}

impl PluginRegistry {
    pub fn named(&self, base: &str) -> Option<&NamedPlugin> {
        self.named.get(base)
    }

    pub fn functional(&self, root: &str) -> Option<&[FunctionalPlugin]> {
        self.functional.get(root).map(Vec::as_slice)
    }

    pub fn has_root(&self, root: &str) -> bool {
        self.functional.contains_key(root)
    }

    pub fn builtin() -> &'static PluginRegistry {
        static BUILTIN: OnceLock<PluginRegistry> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin_registry)
    }
}

fn build_builtin_registry() -> PluginRegistry {
    let mut named = BTreeMap::new();
    for (token, property, value) in NAMED_PLUGINS {
        named.insert(
            (*token).to_string(),
            NamedPlugin {
                property: (*property).to_string(),
                value: (*value).to_string(),
                class: (*token).to_string(),
            },
        );
    }

    let mut functional: BTreeMap<String, Vec<FunctionalPlugin>> = BTreeMap::new();
    for (root, kind, property, scale_key) in FUNCTIONAL_PLUGINS {
        functional
            .entry((*root).to_string())
            .or_default()
            .push(FunctionalPlugin {
                kind: *kind,
                property: (*property).to_string(),
                scale_key: (*scale_key).to_string(),
                class: (*root).to_string(),
            });
    }

    PluginRegistry { named, functional }
}

const NAMED_PLUGINS: &[(&str, &str, &str)] = &[
    ("block", "display", "block"),
    ("inline-block", "display", "inline-block"),
    ("inline", "display", "inline"),
    ("flex", "display", "flex"),
    ("inline-flex", "display", "inline-flex"),
    ("grid", "display", "grid"),
    ("inline-grid", "display", "inline-grid"),
    ("contents", "display", "contents"),
    ("flow-root", "display", "flow-root"),
    ("hidden", "display", "none"),
    ("table", "display", "table"),
    ("static", "position", "static"),
    ("fixed", "position", "fixed"),
    ("absolute", "position", "absolute"),
    ("relative", "position", "relative"),
    ("sticky", "position", "sticky"),
    ("container", "container", "100%"),
    ("visible", "visibility", "visible"),
    ("invisible", "visibility", "hidden"),
    ("collapse", "visibility", "collapse"),
    ("isolate", "isolation", "isolate"),
    ("italic", "font-style", "italic"),
    ("not-italic", "font-style", "normal"),
    ("antialiased", "-webkit-font-smoothing", "antialiased"),
    ("underline", "text-decoration-line", "underline"),
    ("overline", "text-decoration-line", "overline"),
    ("line-through", "text-decoration-line", "line-through"),
    ("no-underline", "text-decoration-line", "none"),
    ("uppercase", "text-transform", "uppercase"),
    ("lowercase", "text-transform", "lowercase"),
    ("capitalize", "text-transform", "capitalize"),
    ("normal-case", "text-transform", "none"),
    ("truncate", "text-overflow", "ellipsis"),
    ("grow", "flex-grow", "1"),
    ("shrink", "flex-shrink", "1"),
    ("flex-row", "flex-direction", "row"),
    ("flex-row-reverse", "flex-direction", "row-reverse"),
    ("flex-col", "flex-direction", "column"),
    ("flex-col-reverse", "flex-direction", "column-reverse"),
    ("flex-wrap", "flex-wrap", "wrap"),
    ("flex-nowrap", "flex-wrap", "nowrap"),
    ("items-start", "align-items", "flex-start"),
    ("items-center", "align-items", "center"),
    ("items-end", "align-items", "flex-end"),
    ("items-stretch", "align-items", "stretch"),
    ("items-baseline", "align-items", "baseline"),
    ("justify-start", "justify-content", "flex-start"),
    ("justify-center", "justify-content", "center"),
    ("justify-end", "justify-content", "flex-end"),
    ("justify-between", "justify-content", "space-between"),
    ("justify-around", "justify-content", "space-around"),
    ("justify-evenly", "justify-content", "space-evenly"),
    ("font-thin", "font-weight", "100"),
    ("font-extralight", "font-weight", "200"),
    ("font-light", "font-weight", "300"),
    ("font-normal", "font-weight", "400"),
    ("font-medium", "font-weight", "500"),
    ("font-semibold", "font-weight", "600"),
    ("font-bold", "font-weight", "700"),
    ("font-extrabold", "font-weight", "800"),
    ("font-black", "font-weight", "900"),
    ("overflow-auto", "overflow", "auto"),
    ("overflow-hidden", "overflow", "hidden"),
    ("overflow-visible", "overflow", "visible"),
    ("overflow-scroll", "overflow", "scroll"),
];

const FUNCTIONAL_PLUGINS: &[(&str, ValueKind, &str, &str)] = &[
    ("m", ValueKind::Length, "margin", "spacing"),
    ("mx", ValueKind::Length, "margin-inline", "spacing"),
    ("my", ValueKind::Length, "margin-block", "spacing"),
    ("mt", ValueKind::Length, "margin-top", "spacing"),
    ("mr", ValueKind::Length, "margin-right", "spacing"),
    ("mb", ValueKind::Length, "margin-bottom", "spacing"),
    ("ml", ValueKind::Length, "margin-left", "spacing"),
    ("p", ValueKind::Length, "padding", "spacing"),
    ("px", ValueKind::Length, "padding-inline", "spacing"),
    ("py", ValueKind::Length, "padding-block", "spacing"),
    ("pt", ValueKind::Length, "padding-top", "spacing"),
    ("pr", ValueKind::Length, "padding-right", "spacing"),
    ("pb", ValueKind::Length, "padding-bottom", "spacing"),
    ("pl", ValueKind::Length, "padding-left", "spacing"),
    ("w", ValueKind::Length, "width", "width"),
    ("min-w", ValueKind::Length, "min-width", "width"),
    ("max-w", ValueKind::Length, "max-width", "width"),
    ("h", ValueKind::Length, "height", "height"),
    ("min-h", ValueKind::Length, "min-height", "height"),
    ("max-h", ValueKind::Length, "max-height", "height"),
    ("inset", ValueKind::Length, "inset", "spacing"),
    ("inset-x", ValueKind::Length, "inset-inline", "spacing"),
    ("inset-y", ValueKind::Length, "inset-block", "spacing"),
    ("top", ValueKind::Length, "top", "spacing"),
    ("right", ValueKind::Length, "right", "spacing"),
    ("bottom", ValueKind::Length, "bottom", "spacing"),
    ("left", ValueKind::Length, "left", "spacing"),
    ("gap", ValueKind::Length, "gap", "spacing"),
    ("gap-x", ValueKind::Length, "column-gap", "spacing"),
    ("gap-y", ValueKind::Length, "row-gap", "spacing"),
    ("bg", ValueKind::Color, "background-color", "colors"),
    ("bg", ValueKind::Url, "background-image", "background-image"),
    ("text", ValueKind::Color, "color", "colors"),
    ("text", ValueKind::Length, "font-size", "text"),
    ("border", ValueKind::Color, "border-color", "colors"),
    ("border", ValueKind::Length, "border-width", "border-width"),
    ("fill", ValueKind::Color, "fill", "colors"),
    ("stroke", ValueKind::Color, "stroke", "colors"),
    ("rounded", ValueKind::Length, "border-radius", "radius"),
    ("opacity", ValueKind::Number, "opacity", "opacity"),
    ("z", ValueKind::Number, "z-index", "z"),
    ("leading", ValueKind::Length, "line-height", "leading"),
    ("tracking", ValueKind::Length, "letter-spacing", "tracking"),
    ("duration", ValueKind::Number, "transition-duration", "duration"),
    ("scale", ValueKind::Number, "scale", "scale"),
    ("translate-x", ValueKind::Length, "translate", "spacing"),
    ("translate-y", ValueKind::Length, "translate", "spacing"),
];

#[cfg(test)]
mod tests {
    use super::{PluginRegistry, ValueKind};

    #[test]
    fn named_lookup_matches_whole_token() {
        let registry = PluginRegistry::builtin();
        let container = registry.named("container").expect("container is named");
        assert_eq!(container.property, "container");
        assert!(registry.named("containe").is_none());
    }

    #[test]
    fn overlapping_roots_are_both_registered() {
        let registry = PluginRegistry::builtin();
        assert!(registry.has_root("m"));
        assert!(registry.has_root("mt"));
        assert!(registry.has_root("min-w"));
    }

    #[test]
    fn shared_roots_carry_competing_kinds() {
        let registry = PluginRegistry::builtin();
        let text = registry.functional("text").expect("text is functional");
        let kinds: Vec<ValueKind> = text.iter().map(|plugin| plugin.kind).collect();
        assert!(kinds.contains(&ValueKind::Color));
        assert!(kinds.contains(&ValueKind::Length));
    }

    #[test]
    fn builtin_registry_is_shared() {
        let first = PluginRegistry::builtin() as *const PluginRegistry;
        let second = PluginRegistry::builtin() as *const PluginRegistry;
        assert_eq!(first, second);
    }
}
