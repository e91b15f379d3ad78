//! Leaf-format sync: local store <-> Tokens Studio files

use chrono::Utc;
use tracing::{info, warn};

use super::SyncSession;
use super::error::SyncResult;
use super::state::{SyncPhase, SyncRun};
use crate::export::studio::StudioExporter;
use crate::import::studio::StudioImporter;
use crate::model::{ModelLoader, ModelSaver};
use crate::models::{TokenCategory, TransformWarning};
use crate::validation::references::resolve_store;

/// Outcome of writing leaf-format files
#[derive(Debug, Clone)]
pub struct StudioPushReport {
    pub run: SyncRun,
    pub token_count: usize,
    pub written_files: Vec<String>,
    pub warnings: Vec<TransformWarning>,
}

/// Outcome of reading leaf-format files back into the store
#[derive(Debug, Clone)]
pub struct StudioPullReport {
    pub run: SyncRun,
    /// Token count per category read from the files
    pub counts: Vec<(TokenCategory, usize)>,
    /// Leaf-format files that were not found
    pub missing_files: Vec<String>,
    pub written_files: Vec<String>,
    pub warnings: Vec<TransformWarning>,
    pub dry_run: bool,
}

impl SyncSession<'_> {
    /// Write one leaf-format file per enabled category and non-empty layer
    pub async fn studio_push(&self) -> SyncResult<StudioPushReport> {
        info!(studio_dir = %self.config.studio_dir, "Starting leaf-format push");
        let mut run = SyncRun::new();
        run.advance(SyncPhase::ValidatingConfig)?;

        run.advance(SyncPhase::Transforming)?;
        let loaded = run.guard(self.load_local().await)?;
        let toggles = &self.config.sync;
        let documents = StudioExporter::export_store(&loaded.store, |layer| {
            toggles.includes_layer(layer)
        });

        run.advance(SyncPhase::Writing)?;
        let written = ModelSaver::new(self.storage)
            .save_studio(&self.config.studio_dir, &documents)
            .await;
        let written_files = run.guard(written.map_err(Into::into))?;

        run.advance(SyncPhase::Succeeded)?;
        Ok(StudioPushReport {
            run,
            token_count: loaded.store.token_count(),
            written_files,
            warnings: loaded.warnings,
        })
    }

    /// Read the leaf-format files and regenerate the token sources.
    ///
    /// A missing file only skips its own layer. Source files keep references
    /// as written; generated modules get resolved values.
    pub async fn studio_pull(&self, dry_run: bool) -> SyncResult<StudioPullReport> {
        info!(dry_run, studio_dir = %self.config.studio_dir, "Starting leaf-format pull");
        let mut run = SyncRun::new();
        run.advance(SyncPhase::ValidatingConfig)?;

        run.advance(SyncPhase::Fetching)?;
        let studio = ModelLoader::new(self.storage)
            .load_studio(&self.config.studio_dir, &self.categories())
            .await;
        let studio = run.guard(studio.map_err(Into::into))?;
        for path in &studio.missing_files {
            warn!("Leaf-format file {} not found", path);
        }

        run.advance(SyncPhase::Transforming)?;
        let (store, mut warnings) = StudioImporter::import_documents(&studio.documents);
        let resolution = resolve_store(&store);
        warnings.extend(resolution.warnings);

        let counts: Vec<(TokenCategory, usize)> = store
            .categories()
            .filter(|(_, tokens)| !tokens.is_empty())
            .map(|(category, tokens)| (category, tokens.token_count()))
            .collect();
        for (category, count) in &counts {
            info!(category = %category, tokens = count, "Read leaf-format tokens");
        }

        let mut report = StudioPullReport {
            run,
            counts,
            missing_files: studio.missing_files,
            written_files: Vec::new(),
            warnings,
            dry_run,
        };

        if dry_run {
            report.run.advance(SyncPhase::Succeeded)?;
            return Ok(report);
        }

        report.run.advance(SyncPhase::Writing)?;
        let saver = ModelSaver::new(self.storage);
        let generated_at = Utc::now();
        for (category, tokens) in store.categories() {
            if tokens.is_empty() {
                continue;
            }
            let source = saver
                .save_category(&self.config.tokens_dir, category, tokens)
                .await;
            report.written_files.push(report.run.guard(source.map_err(Into::into))?);

            let module_tokens = resolution.resolved.get(category).unwrap_or(tokens);
            let module = saver
                .save_module(&self.config.generated_dir, category, module_tokens, generated_at)
                .await;
            report.written_files.push(report.run.guard(module.map_err(Into::into))?);
        }

        report.run.advance(SyncPhase::Succeeded)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorageBackend;
    use crate::sync::config::{SyncConfig, SyncToggles};

    const COLORS: &str = r##"{
        "primitive": {"accent": {"500": "#3AF2D7"}},
        "semantic": {"border": {"focus": "{accent.500}"}},
        "component": {"button": {"ring": "{semantic.border.focus}"}}
    }"##;

    #[tokio::test]
    async fn test_push_writes_layer_files() {
        let config = SyncConfig::default();
        let storage = MemoryStorageBackend::new().with_file("tokens/colors.json", COLORS);

        let report = SyncSession::new(&config, &storage).studio_push().await.unwrap();

        assert_eq!(
            report.written_files,
            vec![
                "tokens/tokens-studio/core/colors.json",
                "tokens/tokens-studio/semantic/colors.json",
                "tokens/tokens-studio/component/colors.json",
            ]
        );
        let semantic = storage
            .contents("tokens/tokens-studio/semantic/colors.json")
            .unwrap();
        assert!(semantic.contains("\"value\": \"{accent.500}\""));
    }

    #[tokio::test]
    async fn test_push_honours_component_toggle() {
        let config = SyncConfig::default().with_toggles(SyncToggles {
            components: false,
            ..Default::default()
        });
        let storage = MemoryStorageBackend::new().with_file("tokens/colors.json", COLORS);

        let report = SyncSession::new(&config, &storage).studio_push().await.unwrap();
        assert_eq!(report.written_files.len(), 2);
    }

    #[tokio::test]
    async fn test_pull_regenerates_sources() {
        let config = SyncConfig::default();
        let storage = MemoryStorageBackend::new().with_file(
            "tokens/tokens-studio/core/spacing.json",
            r#"{"4": {"value": "16", "type": "spacing"}, "gap": {"value": "{4}", "type": "spacing"}}"#,
        );
        let session = SyncSession::new(&config, &storage);

        let preview = session.studio_pull(true).await.unwrap();
        assert_eq!(preview.counts, vec![(TokenCategory::Spacing, 2)]);
        assert_eq!(storage.write_count(), 0);

        let report = session.studio_pull(false).await.unwrap();
        assert_eq!(
            report.written_files,
            vec!["tokens/spacing.json", "generated/spacing.ts"]
        );
        let source = storage.contents("tokens/spacing.json").unwrap();
        assert!(source.contains("\"gap\": \"{4}\""));
        let module = storage.contents("generated/spacing.ts").unwrap();
        assert!(module.contains("gap: '16px',"));
    }
}
