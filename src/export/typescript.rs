//! TypeScript module generator
//!
//! Renders one category as `export const <layer><Category> = { ... } as const;`
//! per non-empty layer, followed by a `typeof` alias.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CategoryTokens, Scalar, TokenCategory, TokenLayer, TokenNode, TokenTree, TokenValue};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());
static NUMERIC_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)$").unwrap());

const INDENT: &str = "  ";

/// Constant name of a layer (`primitiveColors`, `semanticSpacing`)
pub fn constant_name(layer: TokenLayer, category: TokenCategory) -> String {
    format!("{}{}", layer.as_str(), category.title())
}

/// Type alias name of a layer (`PrimitiveColors`)
pub fn type_name(layer: TokenLayer, category: TokenCategory) -> String {
    let constant = constant_name(layer, category);
    let mut chars = constant.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => constant,
    }
}

/// Exporter for generated TypeScript token modules
pub struct TypeScriptExporter;

impl TypeScriptExporter {
    /// Render a full module for one category
    pub fn export_category(
        category: TokenCategory,
        tokens: &CategoryTokens,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut out = String::new();
        out.push_str("/**\n");
        out.push_str(&format!(" * {} tokens\n", category.title()));
        out.push_str(" *\n");
        out.push_str(" * Generated by token-sync. Do not edit by hand.\n");
        out.push_str(&format!(
            " * Last sync: {}\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        out.push_str(" */\n");

        for (layer, tree) in tokens.layers() {
            let constant = constant_name(layer, category);
            out.push('\n');
            out.push_str(&format!("export const {} = {{\n", constant));
            Self::write_tree(&mut out, tree, 1);
            out.push_str("} as const;\n\n");
            out.push_str(&format!(
                "export type {} = typeof {};\n",
                type_name(layer, category),
                constant
            ));
        }
        out
    }

    fn write_tree(out: &mut String, tree: &TokenTree, depth: usize) {
        let indent = INDENT.repeat(depth);
        for (key, node) in tree.children() {
            match node {
                TokenNode::Group(group) => {
                    out.push_str(&format!("{}{}: {{\n", indent, format_key(key)));
                    Self::write_tree(out, group, depth + 1);
                    out.push_str(&format!("{}}},\n", indent));
                }
                TokenNode::Token(token) => {
                    out.push_str(&format!(
                        "{}{}: {},",
                        indent,
                        format_key(key),
                        format_value(&token.value)
                    ));
                    if let Some(description) = &token.description {
                        out.push_str(&format!(" // {}", description.replace('\n', " ")));
                    }
                    out.push('\n');
                }
            }
        }
    }
}

fn format_key(key: &str) -> String {
    if IDENTIFIER.is_match(key) || NUMERIC_KEY.is_match(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn format_value(value: &TokenValue) -> String {
    match value {
        TokenValue::Literal(Scalar::Text(text)) => quote(text),
        TokenValue::Literal(scalar) => scalar.to_string(),
        TokenValue::Reference(_) => quote(&value.to_string()),
    }
}

/// Single-quoted string literal
fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_render_module() {
        let (tokens, _) = CategoryTokens::from_source_json(
            TokenCategory::Colors,
            &json!({
                "primitive": {"primary": {"900": "#0A1F44"}, "glow-soft": "rgba(58, 242, 215, 0.2)"},
                "semantic": {"background": {"primary": "{primary.900}"}}
            }),
        );
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let module = TypeScriptExporter::export_category(TokenCategory::Colors, &tokens, at);

        assert!(module.contains(" * Last sync: 2026-01-02T03:04:05Z\n"));
        assert!(module.contains(
            "export const primitiveColors = {\n  primary: {\n    900: '#0A1F44',\n  },\n  'glow-soft': 'rgba(58, 242, 215, 0.2)',\n} as const;\n"
        ));
        assert!(module.contains("export type PrimitiveColors = typeof primitiveColors;\n"));
        assert!(module.contains("export const semanticColors = {\n  background: {\n    primary: '{primary.900}',\n"));
        assert!(!module.contains("componentColors"));
    }

    #[test]
    fn test_values_and_keys() {
        assert_eq!(format_value(&TokenValue::number(1.5)), "1.5");
        assert_eq!(format_value(&TokenValue::text("it's")), "'it\\'s'");
        assert_eq!(format_value(&TokenValue::text("a\r\nb")), "'a\\r\\nb'");
        assert_eq!(format_key("2xl"), "'2xl'");
        assert_eq!(format_key("0.5"), "'0.5'");
        assert_eq!(format_key("lineHeight"), "lineHeight");
        assert_eq!(type_name(TokenLayer::Semantic, TokenCategory::Motion), "SemanticMotion");
    }
}
