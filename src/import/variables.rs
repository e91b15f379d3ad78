//! Remote variable importer
//!
//! Classifies remote variables by name prefix and resolved type, then
//! rebuilds the nested category trees. Aliases become references to the
//! aliased variable's local path.

use std::collections::HashMap;

use crate::convert::color::color_to_hex;
use crate::convert::units::{append_px, format_number};
use crate::models::{
    RemoteVariable, ResolvedType, Scalar, Token, TokenCategory, TokenLayer, TokenPath, TokenStore,
    TokenType, TokenValue, TransformWarning, VariableValue, VariablesResponse,
};
use crate::sync::config::{CollectionNames, SyncToggles};

/// Local location of a remote variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: TokenCategory,
    pub layer: TokenLayer,
    pub path: TokenPath,
}

impl Classification {
    /// Reference text for an alias written inside `from`
    fn reference_from(&self, from: TokenCategory) -> TokenPath {
        let mut segments: Vec<String> = Vec::new();
        if self.category != from {
            segments.push(self.category.as_str().to_string());
        }
        if self.layer != TokenLayer::Primitive {
            segments.push(self.layer.as_str().to_string());
        }
        segments.extend(self.path.segments().iter().cloned());
        TokenPath::new(segments)
    }
}

/// One imported variable, for verbose listings
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedVariable {
    pub name: String,
    pub category: TokenCategory,
    pub value: TokenValue,
}

/// Result of importing a remote variable set
#[derive(Debug, Clone, Default)]
pub struct VariablesImport {
    pub store: TokenStore,
    pub variables: Vec<ImportedVariable>,
    pub warnings: Vec<TransformWarning>,
}

impl VariablesImport {
    /// Number of imported tokens per category, in canonical order
    pub fn counts(&self) -> Vec<(TokenCategory, usize)> {
        self.store
            .categories()
            .map(|(category, tokens)| (category, tokens.token_count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Keep the local spelling of every imported literal that matches its
    /// local counterpart up to notation (hex case, numbers stored as text).
    pub fn keep_local_spelling(&mut self, local: &TokenStore) {
        for (category, local_tokens) in local.categories() {
            let Some(remote_tokens) = self.store.get_mut(category) else {
                continue;
            };
            for layer in TokenLayer::ALL {
                let tree = remote_tokens.layer_mut(layer);
                for (path, local_token) in local_tokens.layer(layer).leaves() {
                    if let Some(token) = tree.get_mut(&path)
                        && token.value != local_token.value
                        && token.value.same_literal(&local_token.value, &token.token_type)
                    {
                        token.value = local_token.value.clone();
                    }
                }
            }
        }
    }
}

/// Importer for remote variables
pub struct VariablesImporter<'a> {
    collections: &'a CollectionNames,
    toggles: &'a SyncToggles,
}

impl<'a> VariablesImporter<'a> {
    pub fn new(collections: &'a CollectionNames, toggles: &'a SyncToggles) -> Self {
        Self {
            collections,
            toggles,
        }
    }

    /// Map a variable to its category, layer and local path.
    ///
    /// Name prefixes decide first (`semantic/`, `spacing/`, ...); unprefixed
    /// COLOR variables are colors; otherwise the owning collection's name is
    /// matched against the configured collection names.
    pub fn classify(
        &self,
        variable: &RemoteVariable,
        collection_name: Option<&str>,
    ) -> Option<Classification> {
        let mut path = TokenPath::from_slashed(&variable.name);

        let layer = match path.first().and_then(TokenLayer::from_name) {
            Some(layer) if layer != TokenLayer::Primitive => {
                path = path.tail();
                layer
            }
            _ => TokenLayer::Primitive,
        };

        let category = if let Some(category) = path.first().and_then(TokenCategory::from_remote_prefix) {
            path = path.tail();
            category
        } else if variable.resolved_type == ResolvedType::Color {
            TokenCategory::Colors
        } else {
            let name = collection_name?;
            TokenCategory::ALL
                .into_iter()
                .find(|c| self.collections.name(*c) == name)?
        };

        if path.is_empty() {
            return None;
        }
        Some(Classification {
            category,
            layer,
            path: category.to_local_path(&path),
        })
    }

    /// Rebuild category trees from a variables response
    pub fn import(&self, response: &VariablesResponse) -> VariablesImport {
        let mut result = VariablesImport::default();
        let meta = &response.meta;

        let collection_of = |variable: &RemoteVariable| {
            meta.variable_collections.get(&variable.variable_collection_id)
        };

        let mut classified: HashMap<&str, Classification> = HashMap::new();
        for (id, variable) in &meta.variables {
            let name = collection_of(variable).map(|c| c.name.as_str());
            match self.classify(variable, name) {
                Some(classification) => {
                    classified.insert(id.as_str(), classification);
                }
                None => result.warnings.push(TransformWarning::UnclassifiedVariable {
                    name: variable.name.clone(),
                }),
            }
        }

        for (id, variable) in &meta.variables {
            let Some(classification) = classified.get(id.as_str()) else {
                continue;
            };
            if !self.toggles.includes(classification.category)
                || !self.toggles.includes_layer(classification.layer)
            {
                continue;
            }

            let mode_value = collection_of(variable)
                .and_then(|c| c.default_mode_id.as_ref())
                .and_then(|mode| variable.values_by_mode.get(mode))
                .or_else(|| variable.values_by_mode.values().next());
            let Some(mode_value) = mode_value else {
                result.warnings.push(TransformWarning::SkippedLeaf {
                    path: variable.name.clone(),
                    reason: "variable has no mode values".to_string(),
                });
                continue;
            };

            let token_type = classification
                .category
                .token_type_for(&classification.path);
            let value = match mode_value {
                VariableValue::Alias(alias) => match classified.get(alias.id.as_str()) {
                    Some(target) => TokenValue::Reference(target.reference_from(classification.category)),
                    None => {
                        result.warnings.push(TransformWarning::UnresolvedReference {
                            path: variable.name.clone(),
                            reference: alias.id.clone(),
                        });
                        continue;
                    }
                },
                other => local_value(other, &token_type),
            };

            result
                .store
                .category_mut(classification.category)
                .layer_mut(classification.layer)
                .insert(&classification.path, Token::new(value.clone(), token_type));
            result.variables.push(ImportedVariable {
                name: variable.name.clone(),
                category: classification.category,
                value,
            });
        }

        for warning in &result.warnings {
            warning.log();
        }
        result
    }
}

/// Local literal for a remote value
fn local_value(value: &VariableValue, token_type: &TokenType) -> TokenValue {
    match value {
        VariableValue::Color(color) => TokenValue::text(color_to_hex(color)),
        VariableValue::Float(n) if token_type.carries_px_unit() => {
            TokenValue::text(append_px(&format_number(*n)))
        }
        VariableValue::Float(n) => TokenValue::number(*n),
        VariableValue::Boolean(b) => TokenValue::Literal(Scalar::Bool(*b)),
        VariableValue::String(s) => TokenValue::from_scalar(Scalar::Text(s.clone())),
        VariableValue::Alias(alias) => TokenValue::text(alias.id.clone()),
    }
}
