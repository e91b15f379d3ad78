//! Leaf-format (Tokens Studio) importer
//!
//! Only objects carrying both `value` and `type` are leaves; every other
//! object is a group and is walked recursively. Group order is kept as
//! encountered.

use serde_json::{Map, Value};

use crate::convert::units::append_px;
use crate::export::studio::StudioDocument;
use crate::models::{
    Scalar, Token, TokenPath, TokenStore, TokenTree, TokenType, TokenValue, TransformWarning,
};

/// Importer for the leaf-node JSON format
pub struct StudioImporter;

impl StudioImporter {
    fn is_leaf(map: &Map<String, Value>) -> bool {
        map.contains_key("value") && map.contains_key("type")
    }

    /// Parse one leaf object into a token
    pub fn import_token(
        path: &TokenPath,
        leaf: &Map<String, Value>,
        warnings: &mut Vec<TransformWarning>,
    ) -> Option<Token> {
        let token_type = match leaf.get("type") {
            Some(Value::String(tag)) => {
                let Ok(token_type) = tag.parse::<TokenType>();
                token_type
            }
            _ => {
                warnings.push(TransformWarning::SkippedLeaf {
                    path: path.to_string(),
                    reason: "type is not a string".to_string(),
                });
                return None;
            }
        };

        let Some(scalar) = leaf.get("value").and_then(Scalar::from_json) else {
            warnings.push(TransformWarning::SkippedLeaf {
                path: path.to_string(),
                reason: "composite values are not supported".to_string(),
            });
            return None;
        };

        let value = match TokenValue::from_scalar(scalar) {
            TokenValue::Literal(Scalar::Text(text)) if token_type.carries_px_unit() => {
                TokenValue::text(append_px(&text))
            }
            other => other,
        };

        let mut token = Token::new(value, token_type);
        if let Some(Value::String(description)) = leaf.get("description") {
            token = token.with_description(description.clone());
        }
        Some(token)
    }

    /// Walk a leaf-format document into a token tree
    pub fn import_tree(document: &Value, warnings: &mut Vec<TransformWarning>) -> TokenTree {
        let mut tree = TokenTree::new();
        if let Value::Object(map) = document {
            Self::walk(map, &TokenPath::default(), &mut tree, warnings);
        } else {
            warnings.push(TransformWarning::SkippedLeaf {
                path: String::new(),
                reason: "document is not an object".to_string(),
            });
        }
        tree
    }

    fn walk(
        group: &Map<String, Value>,
        prefix: &TokenPath,
        tree: &mut TokenTree,
        warnings: &mut Vec<TransformWarning>,
    ) {
        for (key, value) in group {
            let path = prefix.child(key.clone());
            match value {
                Value::Object(map) if Self::is_leaf(map) => {
                    if let Some(token) = Self::import_token(&path, map, warnings) {
                        tree.insert(&path, token);
                    }
                }
                Value::Object(map) => Self::walk(map, &path, tree, warnings),
                _ => warnings.push(TransformWarning::SkippedLeaf {
                    path: path.to_string(),
                    reason: "expected a group or a {value, type} leaf".to_string(),
                }),
            }
        }
    }

    /// Assemble a store from documents (one per category and layer)
    pub fn import_documents(documents: &[StudioDocument]) -> (TokenStore, Vec<TransformWarning>) {
        let mut store = TokenStore::new();
        let mut warnings = Vec::new();
        for document in documents {
            let tree = Self::import_tree(&document.content, &mut warnings);
            *store.category_mut(document.category).layer_mut(document.layer) = tree;
        }
        (store, warnings)
    }
}
