//! Remote variable types
//!
//! Wire shapes of the design tool's variables API: the `GET` response with
//! collections and variables, and the batch payload accepted by `POST`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved type of a remote variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

/// Normalized RGBA color, every channel in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoteColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl RemoteColor {
    /// Substituted for any color that cannot be parsed
    pub const SENTINEL: RemoteColor = RemoteColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: RemoteColor = RemoteColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

/// Value of a variable in one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(RemoteColor),
    Float(f64),
    Boolean(bool),
    String(String),
}

/// Reference from one variable to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub alias_type: AliasType,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AliasType {
    VariableAlias,
}

/// Per-platform code snippets attached to a variable
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeSyntax {
    #[serde(rename = "WEB", skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(rename = "ANDROID", skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    #[serde(rename = "iOS", skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
}

/// Variable as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteVariable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variable_collection_id: String,
    pub resolved_type: ResolvedType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, VariableValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_syntax: Option<CodeSyntax>,
}

/// Mode of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMode {
    pub mode_id: String,
    pub name: String,
}

/// Collection as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<RemoteMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode_id: Option<String>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

/// Body of `GET /files/{key}/variables/local`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariablesResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: bool,
    pub meta: VariablesMeta,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    #[serde(default)]
    pub variable_collections: IndexMap<String, RemoteCollection>,
    #[serde(default)]
    pub variables: IndexMap<String, RemoteVariable>,
}

/// Kind of change requested for a batch item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionAction {
    pub action: ActionKind,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_mode_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeAction {
    pub action: ActionKind,
    pub id: String,
    pub name: String,
    pub variable_collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableAction {
    pub action: ActionKind,
    pub id: String,
    pub name: String,
    pub variable_collection_id: String,
    pub resolved_type: ResolvedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_syntax: Option<CodeSyntax>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeValueAction {
    pub variable_id: String,
    pub mode_id: String,
    pub value: VariableValue,
}

/// Body of `POST /files/{key}/variables`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesBatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_collections: Vec<CollectionAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_modes: Vec<ModeAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_mode_values: Vec<ModeValueAction>,
}

impl VariablesBatch {
    pub fn is_empty(&self) -> bool {
        self.variable_collections.is_empty()
            && self.variable_modes.is_empty()
            && self.variables.is_empty()
            && self.variable_mode_values.is_empty()
    }
}

/// Creation report returned by `POST`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub meta: BatchMeta,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    #[serde(default, rename = "tempIdToRealId")]
    pub temp_id_to_real_id: HashMap<String, String>,
}
