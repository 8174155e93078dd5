use crate::color::{hex_from_string, is_color, theme_color_from_hex};
use crate::config::Config;
use crate::plugins::{FunctionalPlugin, PluginRegistry, ValueKind};
use crate::segment::{find_root, segment};
use crate::theme::{default_theme, Theme};
use crate::value::{build_modifier, decode_arbitrary_value, infer_value_kind, resolve_value, Value};
use crate::variant::{parse_variant, Variant};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Sign and important markers stripped from the base token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    pub important: bool,
    pub negative: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AstKind {
    Named,
    Functional,
}

/// Successful parse of one utility-class token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ast {
    pub root: String,
    pub kind: AstKind,
    pub property: String,
    pub value: String,
    pub value_def: Value,
    pub variants: Vec<Variant>,
    pub modifier: Option<String>,
    pub important: bool,
    pub negative: bool,
    pub arbitrary: bool,
}

/// Failed parse, returned as a value so batch callers keep going. `root`
/// carries the best-known base text at the point of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub root: String,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn new(root: &str, message: impl Into<String>) -> Self {
        Self {
            root: root.to_string(),
            message: message.into(),
        }
    }
}

/// Parses one token against the built-in plugin tables and the theme
/// resolved from optional user configuration.
pub fn parse(input: &str, config: Option<&Config>) -> Result<Ast, ParseError> {
    match config {
        Some(config) => {
            let theme = Theme::resolve(Some(config));
            parse_with(input, &theme, PluginRegistry::builtin())
        }
        None => parse_with(input, default_theme(), PluginRegistry::builtin()),
    }
}

/// Parses one token against an explicit theme and plugin registry. Pure:
/// same inputs always produce the same result.
pub fn parse_with(
    input: &str,
    theme: &Theme,
    registry: &PluginRegistry,
) -> Result<Ast, ParseError> {
    if input.is_empty() {
        return Err(ParseError::new("", "empty input"));
    }
    trace!(input, "parsing utility class");

    let mut segments = segment(input, ':');
    // Guaranteed non-empty: segment always yields at least one part.
    let mut base = segments.pop().unwrap_or(input);

    let mut variants: Vec<Variant> = Vec::new();
    for raw in segments.iter().rev() {
        match parse_variant(raw, &theme.screens) {
            Some(variant) => variants.push(variant),
            None => debug!(variant = *raw, "dropping unrecognized variant"),
        }
    }

    let mut state = State::default();
    if let Some(stripped) = base.strip_prefix('!') {
        state.important = true;
        base = stripped;
    }
    if let Some(stripped) = base.strip_prefix('-') {
        state.negative = true;
        base = stripped;
    }

    if let Some(named) = registry.named(base) {
        trace!(base, "matched named plugin");
        return Ok(Ast {
            root: base.to_string(),
            kind: AstKind::Named,
            property: named.property.clone(),
            value: named.value.clone(),
            value_def: Value {
                raw: base.to_string(),
                value: named.value.clone(),
                class: named.class.clone(),
                kind: ValueKind::Named,
            },
            variants,
            modifier: None,
            important: state.important,
            negative: state.negative,
            arbitrary: false,
        });
    }

    let (root, value) = find_root(base, |candidate| registry.has_root(candidate));
    let Some(root) = root else {
        debug!(base, "no plugin matches base token");
        return Err(ParseError::new(base, "plugin not found"));
    };
    let value = value.unwrap_or("");
    trace!(root, value, "matched functional root");

    // Root presence is established by find_root; an empty table here would
    // mean the registry and the root index disagree.
    let plugins = registry
        .functional(root)
        .ok_or_else(|| ParseError::new(base, "plugin not found"))?;

    let parts = segment(value, '/');
    let value_without_modifier = parts[0].to_string();
    let modifier_segment = parts.get(1).copied();

    let mut modifier = None;
    if let Some(modifier_segment) = modifier_segment {
        let color_candidate: String = value_without_modifier
            .chars()
            .filter(|ch| !matches!(ch, '[' | ']'))
            .collect();
        if is_color(&color_candidate, theme) {
            modifier = Some(build_modifier(modifier_segment, theme.scale("opacity")));
        }
    }

    if value_without_modifier.starts_with('[') && value_without_modifier.ends_with(']') {
        return parse_arbitrary(
            base,
            root,
            value_without_modifier.clone(),
            plugins,
            theme,
            variants,
            modifier,
            state,
        );
    }

    let value_text = if value.is_empty() { "DEFAULT" } else { value };
    let key_prefix = value_text.split('-').next().unwrap_or(value_text);

    let matched = plugins.iter().find(|plugin| {
        theme.has_key(&plugin.scale_key, key_prefix)
            || theme.has_key(&plugin.scale_key, &value_without_modifier)
    });
    let Some(matched) = matched else {
        return Err(unmatched_value_error(base, plugins, value_text));
    };
    trace!(property = %matched.property, "matched plugin by scale key");

    let lookup_key = if matched.kind == ValueKind::Color {
        value_without_modifier.as_str()
    } else {
        value_text
    };
    let Some(value_def) = resolve_value(lookup_key, matched, theme) else {
        return Err(unmatched_value_error(base, plugins, value_text));
    };

    Ok(Ast {
        root: root.to_string(),
        kind: AstKind::Functional,
        property: matched.property.clone(),
        value: value_def.value.clone(),
        value_def,
        variants,
        modifier,
        important: state.important,
        negative: state.negative,
        arbitrary: false,
    })
}

#[allow(clippy::too_many_arguments)]
fn parse_arbitrary(
    base: &str,
    root: &str,
    mut raw_with_brackets: String,
    plugins: &[FunctionalPlugin],
    theme: &Theme,
    variants: Vec<Variant>,
    modifier: Option<String>,
    state: State,
) -> Result<Ast, ParseError> {
    let inner = raw_with_brackets[1..raw_with_brackets.len() - 1].to_string();
    let kinds: Vec<ValueKind> = plugins.iter().map(|plugin| plugin.kind).collect();
    let inferred = infer_value_kind(&inner, &kinds);
    trace!(value = %inner, ?inferred, "inferred arbitrary value kind");

    let mut selected = plugins.iter().find(|plugin| Some(plugin.kind) == inferred);

    if inferred == Some(ValueKind::Color) {
        let Some(hex) = hex_from_string(&inner) else {
            debug!(value = %inner, "arbitrary color did not normalize to hex");
            return Err(ParseError::new(base, "Color is not correct"));
        };
        let scale_key = selected
            .map(|plugin| plugin.scale_key.as_str())
            .unwrap_or("colors");
        raw_with_brackets = theme_color_from_hex(&hex, theme.scale(scale_key)).unwrap_or(hex);
    } else {
        // No exact kind match: prefer any non-color interpretation over
        // none, mirroring the framework's own permissive handling.
        selected = selected.or_else(|| plugins.iter().find(|plugin| plugin.kind != ValueKind::Color));
    }

    let Some(selected) = selected else {
        return Err(ParseError::new(
            base,
            format!("unable to determine plugin for arbitrary value \"{}\"", inner),
        ));
    };

    let decoded = decode_arbitrary_value(&inner);
    Ok(Ast {
        root: root.to_string(),
        kind: AstKind::Functional,
        property: selected.property.clone(),
        value: decoded.clone(),
        value_def: Value {
            raw: raw_with_brackets,
            value: decoded,
            class: selected.class.clone(),
            kind: inferred.unwrap_or(ValueKind::Named),
        },
        variants,
        modifier,
        important: state.important,
        negative: state.negative,
        arbitrary: true,
    })
}

fn unmatched_value_error(base: &str, plugins: &[FunctionalPlugin], value: &str) -> ParseError {
    let properties = plugins
        .iter()
        .map(|plugin| plugin.property.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    ParseError::new(
        base,
        format!(
            "found \"{}\" plugins but unable to determine which one is matched to given value \"{}\"",
            properties, value
        ),
    )
}
