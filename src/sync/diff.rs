//! Diff orchestrator
//!
//! Compares the local store with the remote file (through the import path in
//! dry-run, verbose mode) or with the leaf-format files.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::SyncSession;
use super::error::SyncResult;
use super::import::{ImportOptions, MergeStrategy};
use super::state::{SyncPhase, SyncRun};
use crate::diff::{TokenDiff, compare_stores};
use crate::import::studio::StudioImporter;
use crate::import::variables::ImportedVariable;
use crate::model::ModelLoader;
use crate::models::TransformWarning;
use crate::remote::VariablesApi;

/// What the local store is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffSource {
    #[default]
    Remote,
    Studio,
}

/// Outcome of a diff run
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub run: SyncRun,
    pub source: DiffSource,
    /// Local store (`category.layer.path`) against the external snapshot
    pub diff: TokenDiff,
    /// Remote variables seen, for the verbose listing
    pub variables: Vec<ImportedVariable>,
    pub warnings: Vec<TransformWarning>,
}

impl SyncSession<'_> {
    /// Compare the local store with the remote file. Nothing is written.
    pub async fn diff_remote(&self, api: &dyn VariablesApi) -> SyncResult<DiffReport> {
        let options = ImportOptions {
            dry_run: true,
            verbose: true,
            strategy: MergeStrategy::Overwrite,
        };
        let import = self.import(api, &options).await?;

        let local = import
            .local
            .filtered(|c| import.remote.get(c).is_some_and(|t| !t.is_empty()));
        let diff = compare_stores(&local, &import.remote);
        info!(
            added = diff.added.len(),
            modified = diff.modified.len(),
            removed = diff.removed.len(),
            "Compared local tokens with remote variables"
        );

        Ok(DiffReport {
            run: import.run,
            source: DiffSource::Remote,
            diff,
            variables: import.variables,
            warnings: import.warnings,
        })
    }

    /// Compare the local store with the leaf-format files. No credentials
    /// are needed.
    pub async fn diff_studio(&self) -> SyncResult<DiffReport> {
        let mut run = SyncRun::new();
        run.advance(SyncPhase::ValidatingConfig)?;

        run.advance(SyncPhase::Fetching)?;
        let categories = self.categories();
        let studio = ModelLoader::new(self.storage)
            .load_studio(&self.config.studio_dir, &categories)
            .await;
        let studio = run.guard(studio.map_err(Into::into))?;

        run.advance(SyncPhase::Transforming)?;
        let (external, mut warnings) = StudioImporter::import_documents(&studio.documents);
        let loaded = run.guard(self.load_local().await)?;
        warnings.extend(loaded.warnings);

        let local = loaded
            .store
            .filtered(|c| external.get(c).is_some_and(|t| !t.is_empty()));
        let diff = compare_stores(&local, &external);
        info!(
            added = diff.added.len(),
            modified = diff.modified.len(),
            removed = diff.removed.len(),
            "Compared local tokens with leaf-format files"
        );

        run.advance(SyncPhase::Succeeded)?;
        Ok(DiffReport {
            run,
            source: DiffSource::Studio,
            diff,
            variables: Vec::new(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;
    use crate::storage::memory::MemoryStorageBackend;
    use crate::sync::config::SyncConfig;

    #[tokio::test]
    async fn test_studio_diff_after_push_is_empty() {
        let config = SyncConfig::default();
        let storage = MemoryStorageBackend::new().with_file(
            "tokens/spacing.json",
            r#"{"primitive": {"4": "16px", "px": "1px"}, "semantic": {"gap": "{4}"}}"#,
        );
        let session = SyncSession::new(&config, &storage);
        session.studio_push().await.unwrap();

        let report = session.diff_studio().await.unwrap();
        assert!(report.diff.is_empty(), "{:?}", report.diff);
        assert_eq!(report.source, DiffSource::Studio);
    }

    #[tokio::test]
    async fn test_studio_diff_reports_edits() {
        let config = SyncConfig::default();
        let storage = MemoryStorageBackend::new().with_file(
            "tokens/spacing.json",
            r#"{"primitive": {"4": "16px"}}"#,
        );
        let session = SyncSession::new(&config, &storage);
        session.studio_push().await.unwrap();

        let edited = serde_json::json!({
            "4": {"value": "18", "type": "spacing"},
            "8": {"value": "32", "type": "spacing"}
        });
        storage
            .write_json("tokens/tokens-studio/core/spacing.json", &edited)
            .await
            .unwrap();

        let report = session.diff_studio().await.unwrap();
        assert_eq!(report.diff.modified_paths(), vec!["spacing.primitive.4"]);
        assert_eq!(report.diff.added_paths(), vec!["spacing.primitive.8"]);
    }
}
