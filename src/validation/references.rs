//! Reference resolution
//!
//! Builds a directed graph over reference tokens and resolves them in
//! dependency order. References that point at a missing token or take part
//! in a cycle are kept raw and reported.

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use std::collections::HashMap;
use std::fmt;

use crate::models::{
    Scalar, TokenCategory, TokenLayer, TokenPath, TokenStore, TokenValue, TransformWarning,
};

/// Fully qualified location of a token in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    pub category: TokenCategory,
    pub layer: TokenLayer,
    pub path: TokenPath,
}

impl TokenKey {
    pub fn new(category: TokenCategory, layer: TokenLayer, path: TokenPath) -> Self {
        Self {
            category,
            layer,
            path,
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.category, self.layer, self.path)
    }
}

/// Result of resolving every reference in a store
#[derive(Debug, Clone, Default)]
pub struct ResolutionResult {
    /// Store with every resolvable reference replaced by its literal
    pub resolved: TokenStore,
    /// References kept raw because their target is missing
    pub unresolved: Vec<TokenKey>,
    /// Cycles found, each as the list of participating tokens
    pub cycles: Vec<Vec<TokenKey>>,
    pub warnings: Vec<TransformWarning>,
}

impl ResolutionResult {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.cycles.is_empty()
    }
}

/// Reference resolver over a token store
pub struct ReferenceResolver<'a> {
    store: &'a TokenStore,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(store: &'a TokenStore) -> Self {
        Self { store }
    }

    /// Find the token a reference written in `category` points at.
    ///
    /// Lookup order: the category's own layers, then `{layer.rest}` within
    /// the category, then `{category.rest}` across categories.
    pub fn lookup(&self, category: TokenCategory, reference: &TokenPath) -> Option<TokenKey> {
        if let Some(key) = self.lookup_in(category, reference) {
            return Some(key);
        }
        let first = reference.first()?;
        if let Ok(target) = first.parse::<TokenCategory>() {
            return self.lookup_in(target, &reference.tail());
        }
        None
    }

    fn lookup_in(&self, category: TokenCategory, path: &TokenPath) -> Option<TokenKey> {
        let tokens = self.store.get(category)?;
        for layer in TokenLayer::ALL {
            if tokens.layer(layer).get(path).is_some() {
                return Some(TokenKey::new(category, layer, path.clone()));
            }
        }
        let layer = TokenLayer::from_name(path.first()?)?;
        let rest = path.tail();
        tokens
            .layer(layer)
            .get(&rest)
            .map(|_| TokenKey::new(category, layer, rest))
    }

    fn value_at(&self, key: &TokenKey) -> Option<&TokenValue> {
        self.store
            .get(key.category)?
            .layer(key.layer)
            .get(&key.path)
            .map(|token| &token.value)
    }

    /// Resolve every reference in the store.
    ///
    /// Strongly connected components come out of Tarjan's algorithm in
    /// reverse topological order, so each reference's target is settled
    /// before the reference itself.
    pub fn resolve(&self) -> ResolutionResult {
        let mut graph = Graph::<TokenKey, (), Directed>::new();
        let mut node_map: HashMap<TokenKey, NodeIndex> = HashMap::new();
        let mut targets: HashMap<TokenKey, (TokenPath, Option<TokenKey>)> = HashMap::new();

        for (category, tokens) in self.store.categories() {
            for (layer, tree) in tokens.layers() {
                for (path, token) in tree.leaves() {
                    let TokenValue::Reference(reference) = &token.value else {
                        continue;
                    };
                    let key = TokenKey::new(category, layer, path);
                    let target = self.lookup(category, reference);
                    node_map
                        .entry(key.clone())
                        .or_insert_with(|| graph.add_node(key.clone()));
                    targets.insert(key, (reference.clone(), target));
                }
            }
        }

        // Edges only between references; literal targets need no ordering
        for (key, (_, target)) in &targets {
            if let Some(target) = target
                && let (Some(&from), Some(&to)) = (node_map.get(key), node_map.get(target))
            {
                graph.add_edge(from, to, ());
            }
        }

        let mut result = ResolutionResult {
            resolved: self.store.clone(),
            ..Default::default()
        };
        let mut literals: HashMap<TokenKey, Scalar> = HashMap::new();

        for component in tarjan_scc(&graph) {
            let cyclic = component.len() > 1
                || component
                    .first()
                    .is_some_and(|&n| graph.contains_edge(n, n));
            if cyclic {
                let cycle: Vec<TokenKey> = component.iter().map(|&n| graph[n].clone()).collect();
                let names: Vec<String> = cycle.iter().map(ToString::to_string).collect();
                for key in &cycle {
                    result.warnings.push(TransformWarning::ReferenceCycle {
                        path: key.to_string(),
                        cycle: names.clone(),
                    });
                }
                result.cycles.push(cycle);
                continue;
            }

            for node in component {
                let key = &graph[node];
                let Some((reference, target)) = targets.get(key) else {
                    continue;
                };
                let literal = target.as_ref().and_then(|t| match self.value_at(t) {
                    Some(TokenValue::Literal(scalar)) => Some(scalar.clone()),
                    Some(TokenValue::Reference(_)) => literals.get(t).cloned(),
                    None => None,
                });
                match literal {
                    Some(scalar) => {
                        literals.insert(key.clone(), scalar);
                    }
                    None => {
                        result.warnings.push(TransformWarning::UnresolvedReference {
                            path: key.to_string(),
                            reference: format!("{{{}}}", reference),
                        });
                        result.unresolved.push(key.clone());
                    }
                }
            }
        }

        for (key, scalar) in literals {
            if let Some(token) = result
                .resolved
                .get_mut(key.category)
                .and_then(|tokens| tokens.layer_mut(key.layer).get_mut(&key.path))
            {
                token.value = TokenValue::Literal(scalar);
            }
        }

        for warning in &result.warnings {
            warning.log();
        }
        result
    }
}

/// Resolve all references of a store in one pass
pub fn resolve_store(store: &TokenStore) -> ResolutionResult {
    ReferenceResolver::new(store).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTokens;
    use serde_json::json;

    fn store_from(category: TokenCategory, source: serde_json::Value) -> TokenStore {
        let (tokens, _) = CategoryTokens::from_source_json(category, &source);
        let mut store = TokenStore::new();
        store.insert(category, tokens);
        store
    }

    #[test]
    fn test_resolves_chained_references() {
        let store = store_from(
            TokenCategory::Colors,
            json!({
                "primitive": {"primary": {"900": "#0A1F44"}},
                "semantic": {"background": {"primary": "{primary.900}"}},
                "component": {"button": {"bg": "{semantic.background.primary}"}}
            }),
        );

        let result = resolve_store(&store);
        assert!(result.is_clean());
        let colors = result.resolved.get(TokenCategory::Colors).unwrap();
        assert_eq!(
            colors.component.get(&"button.bg".into()).unwrap().value,
            TokenValue::text("#0A1F44")
        );
        assert_eq!(
            colors.semantic.get(&"background.primary".into()).unwrap().value,
            TokenValue::text("#0A1F44")
        );
    }

    #[test]
    fn test_cross_category_reference() {
        let mut store = store_from(
            TokenCategory::Colors,
            json!({"primitive": {"accent": {"500": "#3AF2D7"}}}),
        );
        let (elevation, _) = CategoryTokens::from_source_json(
            TokenCategory::Elevation,
            &json!({"semantic": {"glow": "{colors.accent.500}"}}),
        );
        store.insert(TokenCategory::Elevation, elevation);

        let result = resolve_store(&store);
        assert!(result.is_clean());
        let glow = result
            .resolved
            .get(TokenCategory::Elevation)
            .and_then(|t| t.semantic.get(&"glow".into()))
            .unwrap();
        assert_eq!(glow.value, TokenValue::text("#3AF2D7"));
    }

    #[test]
    fn test_unresolved_reference_kept_raw() {
        let store = store_from(
            TokenCategory::Colors,
            json!({"semantic": {"text": {"primary": "{missing.500}"}}}),
        );
        let result = resolve_store(&store);
        assert_eq!(result.unresolved.len(), 1);
        assert!(matches!(
            result.warnings[0],
            TransformWarning::UnresolvedReference { .. }
        ));
        let text = result
            .resolved
            .get(TokenCategory::Colors)
            .and_then(|t| t.semantic.get(&"text.primary".into()))
            .unwrap();
        assert!(text.value.is_reference());
    }

    #[test]
    fn test_cycle_detected() {
        let store = store_from(
            TokenCategory::Colors,
            json!({"semantic": {"a": "{b}", "b": "{a}", "c": "{a}"}}),
        );
        let result = resolve_store(&store);
        assert_eq!(result.cycles.len(), 1);
        assert_eq!(result.cycles[0].len(), 2);
        // `c` depends on the cycle and stays unresolved
        assert_eq!(result.unresolved.len(), 1);
        let cycle_warnings = result
            .warnings
            .iter()
            .filter(|w| matches!(w, TransformWarning::ReferenceCycle { .. }))
            .count();
        assert_eq!(cycle_warnings, 2);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let store = store_from(TokenCategory::Motion, json!({"semantic": {"loop": "{loop}"}}));
        let result = resolve_store(&store);
        assert_eq!(result.cycles.len(), 1);
    }
}
