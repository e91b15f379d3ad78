//! Export orchestrator: local store -> remote variables

use tracing::{info, warn};

use super::SyncSession;
use super::error::SyncResult;
use super::ids::TempIdGenerator;
use super::state::{SyncPhase, SyncRun};
use crate::export::variables::{CategoryCount, VariablesExporter};
use crate::models::{BatchResponse, TransformWarning, VariablesBatch};
use crate::remote::VariablesApi;
use crate::validation::references::resolve_store;

/// Options for an export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Build the batch without sending it
    pub dry_run: bool,
}

/// Outcome of an export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub run: SyncRun,
    pub batch: VariablesBatch,
    pub counts: Vec<CategoryCount>,
    pub warnings: Vec<TransformWarning>,
    /// Token source files that were missing locally
    pub missing_files: Vec<String>,
    /// Creation report, present once the batch was accepted
    pub response: Option<BatchResponse>,
    pub dry_run: bool,
}

impl ExportReport {
    pub fn variable_count(&self) -> usize {
        self.batch.variables.len()
    }

    pub fn collection_count(&self) -> usize {
        self.batch.variable_collections.len()
    }
}

impl SyncSession<'_> {
    /// Push the local store to the remote file as one creation batch.
    ///
    /// Configuration is validated before anything is read or sent. Every run
    /// mints fresh temporary ids from its own generator.
    pub async fn export(
        &self,
        api: &dyn VariablesApi,
        options: &ExportOptions,
    ) -> SyncResult<ExportReport> {
        info!(dry_run = options.dry_run, "Starting export");
        let mut run = SyncRun::new();

        run.advance(SyncPhase::ValidatingConfig)?;
        run.guard(self.config.validate())?;

        run.advance(SyncPhase::Transforming)?;
        let loaded = run.guard(self.load_local().await)?;
        let resolution = resolve_store(&loaded.store);

        let mut ids = TempIdGenerator::new();
        let export = VariablesExporter::new(&self.config.collections, &self.config.sync)
            .export(&resolution.resolved, &mut ids);

        let mut warnings = loaded.warnings;
        warnings.extend(resolution.warnings);
        warnings.extend(export.warnings);

        let mut report = ExportReport {
            run,
            batch: export.batch,
            counts: export.counts,
            warnings,
            missing_files: loaded.missing_files,
            response: None,
            dry_run: options.dry_run,
        };

        if options.dry_run {
            info!(
                variables = report.variable_count(),
                "Dry run: batch built, nothing sent"
            );
            report.run.advance(SyncPhase::Succeeded)?;
            return Ok(report);
        }

        if report.batch.is_empty() {
            warn!("No tokens to export");
            report.run.advance(SyncPhase::Succeeded)?;
            return Ok(report);
        }

        report.run.advance(SyncPhase::Submitting)?;
        info!(
            collections = report.collection_count(),
            variables = report.variable_count(),
            "Submitting variables batch"
        );
        let response = report.run.guard(api.post_variables(&report.batch).await)?;
        info!(
            created = response.meta.temp_id_to_real_id.len(),
            "Batch accepted"
        );
        report.response = Some(response);
        report.run.advance(SyncPhase::Succeeded)?;
        Ok(report)
    }
}
