//! Structural diff of token snapshots
//!
//! Classifies every leaf path present in either snapshot as added, modified
//! or removed. Objects present on both sides are compared recursively; any
//! other pair of values that differs (including an object on one side and a
//! scalar on the other) is a modification.

use serde::Serialize;
use serde_json::Value;

use crate::models::TokenStore;

/// Path present only in the external snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddedEntry {
    pub path: String,
    pub value: Value,
}

/// Path present on both sides with different values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedEntry {
    pub path: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Path present only in the local snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedEntry {
    pub path: String,
    pub old_value: Value,
}

/// Added, modified and removed paths between a local and an external snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TokenDiff {
    pub added: Vec<AddedEntry>,
    pub modified: Vec<ModifiedEntry>,
    pub removed: Vec<RemovedEntry>,
}

impl TokenDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }

    pub fn added_paths(&self) -> Vec<&str> {
        self.added.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn modified_paths(&self) -> Vec<&str> {
        self.modified.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn removed_paths(&self) -> Vec<&str> {
        self.removed.iter().map(|e| e.path.as_str()).collect()
    }
}

/// Compare two JSON trees
pub fn compare(local: &Value, external: &Value) -> TokenDiff {
    let mut diff = TokenDiff::default();
    compare_at(local, external, "", &mut diff);
    diff
}

/// Compare two stores by their nested JSON form (`category.layer.path`)
pub fn compare_stores(local: &TokenStore, external: &TokenStore) -> TokenDiff {
    compare(&local.to_json(), &external.to_json())
}

fn compare_at(local: &Value, external: &Value, prefix: &str, diff: &mut TokenDiff) {
    match (local, external) {
        (Value::Object(local), Value::Object(external)) => {
            for (key, external_value) in external {
                let path = join(prefix, key);
                match local.get(key) {
                    None => diff.added.push(AddedEntry {
                        path,
                        value: external_value.clone(),
                    }),
                    Some(local_value) => compare_at(local_value, external_value, &path, diff),
                }
            }
            for (key, local_value) in local {
                if !external.contains_key(key) {
                    diff.removed.push(RemovedEntry {
                        path: join(prefix, key),
                        old_value: local_value.clone(),
                    });
                }
            }
        }
        (local, external) if !leaf_eq(local, external) => diff.modified.push(ModifiedEntry {
            path: prefix.to_string(),
            old_value: local.clone(),
            new_value: external.clone(),
        }),
        _ => {}
    }
}

/// `1` and `1.0` are the same token value
fn leaf_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
