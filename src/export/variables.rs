//! Remote variable exporter
//!
//! Turns a resolved token store into one creation batch: a collection (with
//! its initial mode) per category, a variable per token and a value for the
//! collection's mode.

use crate::convert::color::parse_color;
use crate::convert::units::{format_number, parse_dimension};
use crate::models::{
    ActionKind, CategoryTokens, CollectionAction, ModeValueAction, RemoteColor, ResolvedType,
    Scalar, Token, TokenCategory, TokenLayer, TokenPath, TokenStore, TokenType, TokenValue,
    TransformWarning, VariableAction, VariableValue, VariablesBatch,
};
use crate::models::remote::CodeSyntax;
use crate::sync::config::{CollectionNames, SyncToggles};
use crate::sync::ids::TempIdGenerator;

/// Remote variable name of a token: `[layer/][category/]path`
pub fn variable_name(category: TokenCategory, layer: TokenLayer, path: &TokenPath) -> String {
    let mut segments: Vec<String> = Vec::new();
    if let Some(prefix) = layer.remote_prefix() {
        segments.push(prefix.to_string());
    }
    if let Some(prefix) = category.remote_prefix() {
        segments.push(prefix.to_string());
    }
    segments.extend(category.to_remote_path(path).segments().iter().cloned());
    TokenPath::new(segments).to_slashed()
}

/// CSS custom property exposed as the WEB code syntax
pub fn css_variable(category: TokenCategory, path: &TokenPath) -> String {
    format!(
        "var(--{}-{})",
        category.css_prefix(),
        category.to_remote_path(path).join("-")
    )
}

/// Per-category count of exported variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: TokenCategory,
    pub collection: String,
    pub variables: usize,
}

/// Batch plus the bookkeeping the caller reports
#[derive(Debug, Clone, Default)]
pub struct VariablesExport {
    pub batch: VariablesBatch,
    pub counts: Vec<CategoryCount>,
    pub warnings: Vec<TransformWarning>,
}

impl VariablesExport {
    pub fn variable_count(&self) -> usize {
        self.batch.variables.len()
    }
}

/// Exporter for remote variables
pub struct VariablesExporter<'a> {
    collections: &'a CollectionNames,
    toggles: &'a SyncToggles,
}

impl<'a> VariablesExporter<'a> {
    pub fn new(collections: &'a CollectionNames, toggles: &'a SyncToggles) -> Self {
        Self {
            collections,
            toggles,
        }
    }

    /// Build the batch for every enabled, non-empty category.
    ///
    /// `store` should already be resolved. A reference that survived
    /// resolution, and was reported there, is passed through as its raw
    /// `{a.b}` text in a STRING variable.
    pub fn export(&self, store: &TokenStore, ids: &mut TempIdGenerator) -> VariablesExport {
        let mut export = VariablesExport::default();

        for (category, tokens) in store.categories() {
            if !self.toggles.includes(category) || tokens.is_empty() {
                continue;
            }
            let collection_id = ids.next_id("collection");
            let mode_id = ids.next_id("mode");
            let collection = self.collections.name(category).to_string();

            export.batch.variable_collections.push(CollectionAction {
                action: ActionKind::Create,
                id: collection_id.clone(),
                name: collection.clone(),
                initial_mode_id: Some(mode_id.clone()),
            });

            let before = export.batch.variables.len();
            self.export_category(category, tokens, &collection_id, &mode_id, ids, &mut export);
            let variables = export.batch.variables.len() - before;

            tracing::info!("{}: {} variables", collection, variables);
            export.counts.push(CategoryCount {
                category,
                collection,
                variables,
            });
        }

        export
    }

    fn export_category(
        &self,
        category: TokenCategory,
        tokens: &CategoryTokens,
        collection_id: &str,
        mode_id: &str,
        ids: &mut TempIdGenerator,
        export: &mut VariablesExport,
    ) {
        let id_prefix = id_prefix(category);
        for (layer, tree) in tokens.layers() {
            if !self.toggles.includes_layer(layer) {
                continue;
            }
            for (path, token) in tree.leaves() {
                let name = variable_name(category, layer, &path);
                let Some((resolved_type, value)) = remote_value(&name, token, &mut export.warnings)
                else {
                    continue;
                };

                let id = ids.next_id(id_prefix);
                export.batch.variables.push(VariableAction {
                    action: ActionKind::Create,
                    id: id.clone(),
                    name: name.clone(),
                    variable_collection_id: collection_id.to_string(),
                    resolved_type,
                    description: Some(describe(category, &path, token)),
                    code_syntax: Some(CodeSyntax {
                        web: Some(css_variable(category, &path)),
                        ..Default::default()
                    }),
                });
                export.batch.variable_mode_values.push(ModeValueAction {
                    variable_id: id,
                    mode_id: mode_id.to_string(),
                    value,
                });
            }
        }
    }
}

fn id_prefix(category: TokenCategory) -> &'static str {
    match category {
        TokenCategory::Colors => "color",
        TokenCategory::Typography => "font",
        TokenCategory::Spacing => "spacing",
        TokenCategory::Elevation => "elevation",
        TokenCategory::Motion => "motion",
    }
}

fn describe(category: TokenCategory, path: &TokenPath, token: &Token) -> String {
    match &token.description {
        Some(description) => description.clone(),
        None => format!("{} {}: {}", category.title(), path, token.value),
    }
}

/// Remote type and value of a token, or `None` when it cannot be exported
fn remote_value(
    name: &str,
    token: &Token,
    warnings: &mut Vec<TransformWarning>,
) -> Option<(ResolvedType, VariableValue)> {
    let path = TokenPath::from_slashed(name);
    let scalar = match &token.value {
        TokenValue::Literal(scalar) => scalar,
        TokenValue::Reference(reference) => {
            return Some((
                ResolvedType::String,
                VariableValue::String(format!("{{{}}}", reference)),
            ));
        }
    };

    if token.token_type == TokenType::Color {
        let color = match scalar {
            Scalar::Text(text) => parse_color(text),
            _ => None,
        };
        let color = color.unwrap_or_else(|| {
            let warning = TransformWarning::malformed_color(&path, &scalar.to_string());
            warning.log();
            warnings.push(warning);
            RemoteColor::SENTINEL
        });
        return Some((ResolvedType::Color, VariableValue::Color(color)));
    }

    if token.token_type.is_numeric() {
        let number = match scalar {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(text) => parse_dimension(text),
            Scalar::Bool(_) => None,
        };
        return match number {
            Some(n) => Some((ResolvedType::Float, VariableValue::Float(n))),
            None => {
                let warning = TransformWarning::non_numeric(&path, &scalar.to_string());
                warning.log();
                warnings.push(warning);
                None
            }
        };
    }

    Some(match scalar {
        Scalar::Number(n) => (ResolvedType::Float, VariableValue::Float(*n)),
        Scalar::Bool(b) => (ResolvedType::Boolean, VariableValue::Boolean(*b)),
        Scalar::Text(text) => (ResolvedType::String, VariableValue::String(text.clone())),
    })
}

/// Render a variable value for summaries
pub fn display_value(value: &VariableValue) -> String {
    match value {
        VariableValue::Color(color) => crate::convert::color::color_to_hex(color),
        VariableValue::Float(n) => format_number(*n),
        VariableValue::Boolean(b) => b.to_string(),
        VariableValue::String(s) => s.clone(),
        VariableValue::Alias(alias) => format!("alias({})", alias.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(category: TokenCategory, source: serde_json::Value) -> TokenStore {
        let (tokens, _) = CategoryTokens::from_source_json(category, &source);
        let mut store = TokenStore::new();
        store.insert(category, tokens);
        store
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(
            variable_name(TokenCategory::Colors, TokenLayer::Primitive, &"primary.900".into()),
            "primary/900"
        );
        assert_eq!(
            variable_name(
                TokenCategory::Colors,
                TokenLayer::Semantic,
                &"background.primary".into()
            ),
            "semantic/background/primary"
        );
        assert_eq!(
            variable_name(TokenCategory::Typography, TokenLayer::Primitive, &"fontSize.xs".into()),
            "typography/size/xs"
        );
        assert_eq!(
            variable_name(TokenCategory::Elevation, TokenLayer::Primitive, &"radius.md".into()),
            "elevation/radius/md"
        );
        assert_eq!(
            css_variable(TokenCategory::Spacing, &"4".into()),
            "var(--space-4)"
        );
    }

    #[test]
    fn test_export_builds_collection_variables_and_values() {
        let store = store(TokenCategory::Spacing, json!({"primitive": {"4": "16px", "0": "0"}}));
        let collections = CollectionNames::default();
        let toggles = SyncToggles::default();
        let mut ids = TempIdGenerator::new();

        let export = VariablesExporter::new(&collections, &toggles).export(&store, &mut ids);

        assert_eq!(export.batch.variable_collections.len(), 1);
        let collection = &export.batch.variable_collections[0];
        assert_eq!(collection.name, "Spacing");
        assert_eq!(collection.id, "temp_collection_1");
        assert_eq!(collection.initial_mode_id.as_deref(), Some("temp_mode_2"));

        assert_eq!(export.variable_count(), 2);
        let four = &export.batch.variables[0];
        assert_eq!(four.name, "spacing/4");
        assert_eq!(four.resolved_type, ResolvedType::Float);
        assert_eq!(four.variable_collection_id, "temp_collection_1");
        assert_eq!(export.batch.variable_mode_values[0].value, VariableValue::Float(16.0));
        assert_eq!(export.batch.variable_mode_values[1].value, VariableValue::Float(0.0));
        assert_eq!(export.counts[0].variables, 2);
    }

    #[test]
    fn test_malformed_color_uses_sentinel() {
        let store = store(TokenCategory::Colors, json!({"primitive": {"broken": "#12"}}));
        let collections = CollectionNames::default();
        let toggles = SyncToggles::default();
        let export =
            VariablesExporter::new(&collections, &toggles).export(&store, &mut TempIdGenerator::new());

        assert_eq!(
            export.batch.variable_mode_values[0].value,
            VariableValue::Color(RemoteColor::SENTINEL)
        );
        assert!(matches!(
            export.warnings[0],
            TransformWarning::MalformedColor { .. }
        ));
    }

    #[test]
    fn test_non_numeric_skipped() {
        let store = store(
            TokenCategory::Typography,
            json!({"primitive": {"fontSize": {"fluid": "clamp(1rem, 2vw, 2rem)", "xs": "12px"}}}),
        );
        let collections = CollectionNames::default();
        let toggles = SyncToggles::default();
        let export =
            VariablesExporter::new(&collections, &toggles).export(&store, &mut TempIdGenerator::new());

        assert_eq!(export.variable_count(), 1);
        assert_eq!(export.batch.variables[0].name, "typography/size/xs");
        assert!(matches!(export.warnings[0], TransformWarning::NonNumeric { .. }));
    }

    #[test]
    fn test_toggles_filter_categories_and_component_layer() {
        let mut store = store(
            TokenCategory::Colors,
            json!({
                "primitive": {"white": "#FFFFFF"},
                "component": {"button": {"bg": "#000000"}}
            }),
        );
        let (motion, _) = CategoryTokens::from_source_json(
            TokenCategory::Motion,
            &json!({"duration": {"fast": "150ms"}}),
        );
        store.insert(TokenCategory::Motion, motion);

        let collections = CollectionNames::default();
        let toggles = SyncToggles {
            motion: false,
            components: false,
            ..Default::default()
        };
        let export =
            VariablesExporter::new(&collections, &toggles).export(&store, &mut TempIdGenerator::new());

        assert_eq!(export.batch.variable_collections.len(), 1);
        assert_eq!(export.variable_count(), 1);
        assert_eq!(export.batch.variables[0].name, "white");
    }

    #[test]
    fn test_strings_and_booleans() {
        let store = store(
            TokenCategory::Motion,
            json!({"primitive": {"easing": {"out": "cubic-bezier(0.16, 1, 0.3, 1)"}, "reduced": true}}),
        );
        let collections = CollectionNames::default();
        let toggles = SyncToggles::default();
        let export =
            VariablesExporter::new(&collections, &toggles).export(&store, &mut TempIdGenerator::new());

        assert_eq!(export.batch.variables[0].name, "motion/easing/out");
        assert_eq!(export.batch.variables[0].resolved_type, ResolvedType::String);
        assert_eq!(export.batch.variables[1].resolved_type, ResolvedType::Boolean);
    }

    #[test]
    fn test_unresolved_reference_passes_through_raw() {
        let store = store(
            TokenCategory::Colors,
            json!({
                "primitive": {"primary": {"900": "#0A1F44"}},
                "semantic": {"bg": "{missing.token}"}
            }),
        );
        let collections = CollectionNames::default();
        let toggles = SyncToggles::default();
        let export =
            VariablesExporter::new(&collections, &toggles).export(&store, &mut TempIdGenerator::new());

        assert_eq!(export.variable_count(), 2);
        let bg = &export.batch.variables[1];
        assert_eq!(bg.name, "semantic/bg");
        assert_eq!(bg.resolved_type, ResolvedType::String);
        assert_eq!(
            export.batch.variable_mode_values[1].value,
            VariableValue::String("{missing.token}".to_string())
        );
        assert!(export.warnings.is_empty());
    }
}
