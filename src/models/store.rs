//! Token Store
//!
//! Five categories, each split into primitive, semantic and component layers.
//! Source files hold nested objects whose leaves are plain scalars; token
//! types are derived from the category and the leaf's path.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::category::{TokenCategory, TokenLayer};
use super::token::{Scalar, Token, TokenPath, TokenTree, TokenValue};
use super::warning::TransformWarning;

/// The three layers of one category
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTokens {
    pub primitive: TokenTree,
    pub semantic: TokenTree,
    pub component: TokenTree,
}

impl CategoryTokens {
    pub fn layer(&self, layer: TokenLayer) -> &TokenTree {
        match layer {
            TokenLayer::Primitive => &self.primitive,
            TokenLayer::Semantic => &self.semantic,
            TokenLayer::Component => &self.component,
        }
    }

    pub fn layer_mut(&mut self, layer: TokenLayer) -> &mut TokenTree {
        match layer {
            TokenLayer::Primitive => &mut self.primitive,
            TokenLayer::Semantic => &mut self.semantic,
            TokenLayer::Component => &mut self.component,
        }
    }

    /// Non-empty layers in canonical order
    pub fn layers(&self) -> impl Iterator<Item = (TokenLayer, &TokenTree)> {
        TokenLayer::ALL
            .into_iter()
            .map(|layer| (layer, self.layer(layer)))
            .filter(|(_, tree)| !tree.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.layers().next().is_none()
    }

    pub fn token_count(&self) -> usize {
        self.layers().map(|(_, tree)| tree.token_count()).sum()
    }

    /// Parse a category source document.
    ///
    /// The document is an object with optional `primitive`, `semantic` and
    /// `component` members. A document with none of those keys is read as a
    /// bare primitive tree.
    pub fn from_source_json(
        category: TokenCategory,
        document: &Value,
    ) -> (Self, Vec<TransformWarning>) {
        let mut tokens = CategoryTokens::default();
        let mut warnings = Vec::new();

        let Value::Object(map) = document else {
            warnings.push(TransformWarning::SkippedLeaf {
                path: category.to_string(),
                reason: "source document is not an object".to_string(),
            });
            return (tokens, warnings);
        };

        let layered = map.keys().any(|k| TokenLayer::from_name(k).is_some());
        if !layered {
            parse_group(category, map, &TokenPath::default(), &mut tokens.primitive, &mut warnings);
            return (tokens, warnings);
        }

        for (key, value) in map {
            let Some(layer) = TokenLayer::from_name(key) else {
                warnings.push(TransformWarning::SkippedLeaf {
                    path: format!("{}.{}", category, key),
                    reason: "unknown layer".to_string(),
                });
                continue;
            };
            match value {
                Value::Object(group) => parse_group(
                    category,
                    group,
                    &TokenPath::default(),
                    tokens.layer_mut(layer),
                    &mut warnings,
                ),
                _ => warnings.push(TransformWarning::SkippedLeaf {
                    path: format!("{}.{}", category, key),
                    reason: "layer is not an object".to_string(),
                }),
            }
        }

        (tokens, warnings)
    }

    /// Render as a source document (layers as top-level members)
    pub fn to_source_json(&self) -> Value {
        let mut map = Map::new();
        for (layer, tree) in self.layers() {
            map.insert(layer.as_str().to_string(), tree.to_value_json());
        }
        Value::Object(map)
    }
}

fn parse_group(
    category: TokenCategory,
    group: &Map<String, Value>,
    prefix: &TokenPath,
    tree: &mut TokenTree,
    warnings: &mut Vec<TransformWarning>,
) {
    for (key, value) in group {
        let path = prefix.child(key.clone());
        match value {
            Value::Object(nested) => parse_group(category, nested, &path, tree, warnings),
            other => match Scalar::from_json(other) {
                Some(scalar) => {
                    let token = Token::new(
                        TokenValue::from_scalar(scalar),
                        category.token_type_for(&path),
                    );
                    tree.insert(&path, token);
                }
                None => warnings.push(TransformWarning::SkippedLeaf {
                    path: format!("{}.{}", category, path),
                    reason: "value is neither a scalar nor a group".to_string(),
                }),
            },
        }
    }
}

/// All token categories keyed in canonical order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenStore {
    categories: IndexMap<TokenCategory, CategoryTokens>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: TokenCategory, tokens: CategoryTokens) {
        self.categories.insert(category, tokens);
        self.categories.sort_keys();
    }

    pub fn get(&self, category: TokenCategory) -> Option<&CategoryTokens> {
        self.categories.get(&category)
    }

    pub fn get_mut(&mut self, category: TokenCategory) -> Option<&mut CategoryTokens> {
        self.categories.get_mut(&category)
    }

    /// Entry for `category`, created empty if missing
    pub fn category_mut(&mut self, category: TokenCategory) -> &mut CategoryTokens {
        if !self.categories.contains_key(&category) {
            self.insert(category, CategoryTokens::default());
        }
        self.categories.entry(category).or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = (TokenCategory, &CategoryTokens)> {
        self.categories.iter().map(|(c, t)| (*c, t))
    }

    pub fn token_count(&self) -> usize {
        self.categories.values().map(CategoryTokens::token_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(CategoryTokens::is_empty)
    }

    /// Store restricted to the categories accepted by `keep`
    pub fn filtered(&self, keep: impl Fn(TokenCategory) -> bool) -> TokenStore {
        TokenStore {
            categories: self
                .categories
                .iter()
                .filter(|(c, _)| keep(**c))
                .map(|(c, t)| (*c, t.clone()))
                .collect(),
        }
    }

    /// Nested JSON of the whole store keyed by category, used for diffing
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (category, tokens) in &self.categories {
            if !tokens.is_empty() {
                map.insert(category.as_str().to_string(), tokens.to_source_json());
            }
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::TokenType;
    use serde_json::json;

    #[test]
    fn test_parse_layered_source() {
        let source = json!({
            "primitive": {
                "primary": {"900": "#0A1F44", "700": "#0F2C5C"},
                "white": "#FFFFFF"
            },
            "semantic": {
                "background": {"primary": "{primary.900}"}
            }
        });

        let (tokens, warnings) = CategoryTokens::from_source_json(TokenCategory::Colors, &source);
        assert!(warnings.is_empty());
        assert_eq!(tokens.primitive.token_count(), 3);
        let bg = tokens.semantic.get(&"background.primary".into()).unwrap();
        assert_eq!(bg.value, TokenValue::Reference("primary.900".into()));
        assert_eq!(bg.token_type, TokenType::Color);
        assert_eq!(tokens.to_source_json(), source);
    }

    #[test]
    fn test_parse_flat_source_as_primitive() {
        let source = json!({"fontSize": {"xs": "12px"}, "columns": 12});
        let (tokens, _) = CategoryTokens::from_source_json(TokenCategory::Typography, &source);
        assert_eq!(tokens.primitive.token_count(), 2);
        assert!(tokens.semantic.is_empty());
        assert_eq!(
            tokens.primitive.get(&"fontSize.xs".into()).unwrap().token_type,
            TokenType::FontSizes
        );
    }

    #[test]
    fn test_arrays_are_skipped_with_warning() {
        let source = json!({"primitive": {"fontFamily": {"body": ["Inter", "sans-serif"]}}});
        let (tokens, warnings) =
            CategoryTokens::from_source_json(TokenCategory::Typography, &source);
        assert!(tokens.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], TransformWarning::SkippedLeaf { .. }));
    }

    #[test]
    fn test_store_keeps_canonical_category_order() {
        let mut store = TokenStore::new();
        store.insert(TokenCategory::Motion, CategoryTokens::default());
        store.insert(TokenCategory::Colors, CategoryTokens::default());
        let order: Vec<TokenCategory> = store.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec![TokenCategory::Colors, TokenCategory::Motion]);
    }
}
