//! Leaf-format (Tokens Studio) exporter
//!
//! Every token becomes `{ "value": ..., "type": ..., "description"? }`; every
//! group becomes a nested object under the same key. References are written
//! as aliases (`{primary.900}`) and left for the consuming tool to resolve.

use serde_json::{Map, Value};

use crate::convert::units::strip_px;
use crate::models::{
    CategoryTokens, Scalar, Token, TokenCategory, TokenLayer, TokenNode, TokenStore, TokenTree,
    TokenValue,
};
use crate::storage::join_path;

/// One leaf-format document destined for `<studio_dir>/<layer dir>/<category>.json`
#[derive(Debug, Clone, PartialEq)]
pub struct StudioDocument {
    pub category: TokenCategory,
    pub layer: TokenLayer,
    pub content: Value,
}

impl StudioDocument {
    /// Path relative to the studio directory
    pub fn relative_path(&self) -> String {
        studio_path(self.layer, self.category)
    }
}

/// Relative path of the leaf-format file for a layer and category
pub fn studio_path(layer: TokenLayer, category: TokenCategory) -> String {
    join_path(layer.studio_dir(), &category.file_name())
}

/// Exporter for the leaf-node JSON format
pub struct StudioExporter;

impl StudioExporter {
    /// Leaf-format value of a single token
    pub fn export_token(token: &Token) -> Value {
        let value = match &token.value {
            TokenValue::Reference(_) => token.value.to_json(),
            TokenValue::Literal(Scalar::Text(text)) if token.token_type.carries_px_unit() => {
                Value::String(strip_px(text))
            }
            TokenValue::Literal(scalar) => scalar.to_json(),
        };

        let mut leaf = Map::new();
        leaf.insert("value".to_string(), value);
        leaf.insert(
            "type".to_string(),
            Value::String(token.token_type.as_str().to_string()),
        );
        if let Some(description) = &token.description {
            leaf.insert("description".to_string(), Value::String(description.clone()));
        }
        Value::Object(leaf)
    }

    /// Export a tree, preserving group order
    pub fn export_tree(tree: &TokenTree) -> Value {
        let mut map = Map::new();
        for (key, node) in tree.children() {
            let value = match node {
                TokenNode::Token(token) => Self::export_token(token),
                TokenNode::Group(group) => Self::export_tree(group),
            };
            map.insert(key.clone(), value);
        }
        Value::Object(map)
    }

    /// One document per non-empty layer accepted by `include_layer`
    pub fn export_category(
        category: TokenCategory,
        tokens: &CategoryTokens,
        include_layer: impl Fn(TokenLayer) -> bool,
    ) -> Vec<StudioDocument> {
        tokens
            .layers()
            .filter(|(layer, _)| include_layer(*layer))
            .map(|(layer, tree)| StudioDocument {
                category,
                layer,
                content: Self::export_tree(tree),
            })
            .collect()
    }

    /// Documents for every category of the store
    pub fn export_store(
        store: &TokenStore,
        include_layer: impl Fn(TokenLayer) -> bool,
    ) -> Vec<StudioDocument> {
        store
            .categories()
            .flat_map(|(category, tokens)| {
                Self::export_category(category, tokens, &include_layer)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenType;
    use serde_json::json;

    #[test]
    fn test_export_strips_px_for_unit_types() {
        let mut tree = TokenTree::new();
        tree.insert(
            &"4".into(),
            Token::new(TokenValue::text("16px"), TokenType::Spacing),
        );
        tree.insert(
            &"full".into(),
            Token::new(TokenValue::text("100%"), TokenType::Spacing),
        );

        assert_eq!(
            StudioExporter::export_tree(&tree),
            json!({
                "4": {"value": "16", "type": "spacing"},
                "full": {"value": "100%", "type": "spacing"}
            })
        );
    }

    #[test]
    fn test_export_keeps_colors_numbers_and_aliases() {
        let mut tree = TokenTree::new();
        tree.insert(
            &"glow".into(),
            Token::new(TokenValue::text("#3AF2D780"), TokenType::Color)
                .with_description("Accent glow"),
        );
        tree.insert(
            &"bold".into(),
            Token::new(TokenValue::number(700.0), TokenType::FontWeights),
        );
        tree.insert(
            &"bg".into(),
            Token::new(TokenValue::Reference("primary.900".into()), TokenType::Color),
        );

        assert_eq!(
            StudioExporter::export_tree(&tree),
            json!({
                "glow": {"value": "#3AF2D780", "type": "color", "description": "Accent glow"},
                "bold": {"value": 700, "type": "fontWeights"},
                "bg": {"value": "{primary.900}", "type": "color"}
            })
        );
    }

    #[test]
    fn test_document_paths() {
        assert_eq!(
            studio_path(TokenLayer::Primitive, TokenCategory::Colors),
            "core/colors.json"
        );
        assert_eq!(
            studio_path(TokenLayer::Component, TokenCategory::Spacing),
            "component/spacing.json"
        );
    }
}
