//! Import orchestrator: remote variables -> local store
//!
//! Remote tokens are merged into the local store by default. Local tokens
//! the remote file does not know are kept and reported as conflicts, and a
//! local reference survives when it still resolves to the remote value.
//! [`MergeStrategy::Overwrite`] replaces each imported category wholesale.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::SyncSession;
use super::error::SyncResult;
use super::state::{SyncPhase, SyncRun};
use crate::diff::{TokenDiff, compare};
use crate::import::variables::{ImportedVariable, VariablesImporter};
use crate::model::ModelSaver;
use crate::models::{CategoryTokens, TokenCategory, TokenLayer, TokenStore, TransformWarning};
use crate::remote::VariablesApi;
use crate::validation::references::resolve_store;

/// How imported tokens are combined with the local store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Merge,
    Overwrite,
}

/// Options for an import run
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Report what would change without writing any file
    pub dry_run: bool,
    /// Keep the per-variable listing in the report
    pub verbose: bool,
    pub strategy: MergeStrategy,
}

/// Import result for one category
#[derive(Debug, Clone)]
pub struct CategoryImport {
    pub category: TokenCategory,
    /// Tokens received from the remote file
    pub imported: usize,
    /// Local snapshot against the merged result
    pub diff: TokenDiff,
    /// Local-only token paths (`layer.path`) kept by the merge
    pub conflicts: Vec<String>,
    /// Tokens after merging
    pub tokens: CategoryTokens,
}

/// Outcome of an import run
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub run: SyncRun,
    pub collections: usize,
    pub variables_fetched: usize,
    pub categories: Vec<CategoryImport>,
    /// Per-variable listing, filled in verbose mode
    pub variables: Vec<ImportedVariable>,
    pub warnings: Vec<TransformWarning>,
    /// Enabled categories of the local store before the import
    pub local: TokenStore,
    /// Tokens as classified from the remote file
    pub remote: TokenStore,
    pub written_files: Vec<String>,
    pub dry_run: bool,
}

impl ImportReport {
    pub fn imported_count(&self) -> usize {
        self.categories.iter().map(|c| c.imported).sum()
    }

    pub fn conflict_count(&self) -> usize {
        self.categories.iter().map(|c| c.conflicts.len()).sum()
    }
}

impl SyncSession<'_> {
    /// Fetch the remote variables and fold them into the local store.
    ///
    /// In dry-run mode no file is written, whatever was detected.
    pub async fn import(
        &self,
        api: &dyn VariablesApi,
        options: &ImportOptions,
    ) -> SyncResult<ImportReport> {
        info!(
            dry_run = options.dry_run,
            strategy = ?options.strategy,
            "Starting import"
        );
        let mut run = SyncRun::new();

        run.advance(SyncPhase::ValidatingConfig)?;
        run.guard(self.config.validate())?;

        run.advance(SyncPhase::Fetching)?;
        let response = run.guard(api.local_variables().await)?;
        let collections = response.meta.variable_collections.len();
        let variables_fetched = response.meta.variables.len();
        info!(collections, variables = variables_fetched, "Fetched remote variables");

        run.advance(SyncPhase::Transforming)?;
        let mut imported = VariablesImporter::new(&self.config.collections, &self.config.sync)
            .import(&response);
        let loaded = run.guard(self.load_local().await)?;
        imported.keep_local_spelling(&loaded.store);

        let mut warnings = imported.warnings.clone();
        warnings.extend(loaded.warnings);

        let local_resolved = resolve_store(&loaded.store).resolved;
        let remote_resolved = resolve_store(&imported.store).resolved;

        let mut categories = Vec::new();
        for (category, remote_tokens) in imported.store.categories() {
            if remote_tokens.is_empty() {
                continue;
            }
            let empty = CategoryTokens::default();
            let local_tokens = loaded.store.get(category).unwrap_or(&empty);

            let (tokens, conflicts) = match options.strategy {
                MergeStrategy::Overwrite => (remote_tokens.clone(), Vec::new()),
                MergeStrategy::Merge => merge_category(
                    local_tokens,
                    remote_tokens,
                    local_resolved.get(category).unwrap_or(&empty),
                    remote_resolved.get(category).unwrap_or(&empty),
                ),
            };
            let diff = compare(&local_tokens.to_source_json(), &tokens.to_source_json());

            info!(
                category = %category,
                imported = remote_tokens.token_count(),
                added = diff.added.len(),
                modified = diff.modified.len(),
                removed = diff.removed.len(),
                conflicts = conflicts.len(),
                "Category imported"
            );
            categories.push(CategoryImport {
                category,
                imported: remote_tokens.token_count(),
                diff,
                conflicts,
                tokens,
            });
        }

        let mut report = ImportReport {
            run,
            collections,
            variables_fetched,
            categories,
            variables: if options.verbose {
                imported.variables.clone()
            } else {
                Vec::new()
            },
            warnings,
            local: loaded.store,
            remote: imported.store,
            written_files: Vec::new(),
            dry_run: options.dry_run,
        };

        if options.dry_run {
            info!("Dry run: no files written");
            report.run.advance(SyncPhase::Succeeded)?;
            return Ok(report);
        }

        report.run.advance(SyncPhase::Writing)?;
        let written = self.write_categories(&report.categories).await;
        report.written_files = report.run.guard(written)?;
        report.run.advance(SyncPhase::Succeeded)?;
        Ok(report)
    }

    /// Write the source file and generated module of each imported category
    async fn write_categories(&self, categories: &[CategoryImport]) -> SyncResult<Vec<String>> {
        let saver = ModelSaver::new(self.storage);
        let generated_at = Utc::now();
        let mut written = Vec::new();

        let mut merged = TokenStore::new();
        for entry in categories {
            merged.insert(entry.category, entry.tokens.clone());
        }
        let resolved = resolve_store(&merged).resolved;

        for entry in categories {
            written.push(
                saver
                    .save_category(&self.config.tokens_dir, entry.category, &entry.tokens)
                    .await?,
            );
            let module_tokens = resolved.get(entry.category).unwrap_or(&entry.tokens);
            written.push(
                saver
                    .save_module(
                        &self.config.generated_dir,
                        entry.category,
                        module_tokens,
                        generated_at,
                    )
                    .await?,
            );
        }
        Ok(written)
    }
}

/// Merge remote tokens into a local category.
///
/// Returns the merged tokens and the local-only paths that were kept.
fn merge_category(
    local: &CategoryTokens,
    remote: &CategoryTokens,
    local_resolved: &CategoryTokens,
    remote_resolved: &CategoryTokens,
) -> (CategoryTokens, Vec<String>) {
    let mut merged = local.clone();

    for layer in TokenLayer::ALL {
        for (path, remote_token) in remote.layer(layer).leaves() {
            let local_token = local.layer(layer).get(&path);
            let unchanged_reference = local_token.is_some_and(|t| t.value.is_reference())
                && local_resolved
                    .layer(layer)
                    .get(&path)
                    .zip(remote_resolved.layer(layer).get(&path))
                    .is_some_and(|(l, r)| l.value.same_literal(&r.value, &l.token_type));
            if unchanged_reference {
                continue;
            }

            let mut token = remote_token.clone();
            if token.description.is_none() {
                token.description = local_token.and_then(|t| t.description.clone());
            }
            merged.layer_mut(layer).insert(&path, token);
        }
    }

    let conflicts = TokenLayer::ALL
        .into_iter()
        .flat_map(|layer| {
            local
                .layer(layer)
                .leaves()
                .into_iter()
                .filter(|(path, _)| remote.layer(layer).get(path).is_none())
                .map(move |(path, _)| format!("{}.{}", layer, path))
                .collect::<Vec<_>>()
        })
        .collect();

    (merged, conflicts)
}
