//! Sync orchestration
//!
//! A [`SyncSession`] binds a configuration to a storage backend and runs the
//! one-shot sync procedures:
//! - `export`: local store -> remote variables
//! - `import`: remote variables -> local store and generated modules
//! - `diff_remote` / `diff_studio`: structural comparison with local tokens
//! - `studio_push` / `studio_pull`: local store <-> leaf-format files
//!
//! Each run walks the [`state::SyncRun`] state machine and returns a report
//! carrying its phase history and every transform warning.

pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod ids;
pub mod import;
pub mod state;
pub mod studio;

pub use config::{CollectionNames, SyncConfig, SyncToggles};
pub use diff::{DiffReport, DiffSource};
pub use error::{SyncError, SyncResult};
pub use export::{ExportOptions, ExportReport};
pub use ids::TempIdGenerator;
pub use import::{CategoryImport, ImportOptions, ImportReport, MergeStrategy};
pub use state::{SyncPhase, SyncRun};
pub use studio::{StudioPullReport, StudioPushReport};

use tracing::warn;

use crate::model::{ModelLoadResult, ModelLoader};
use crate::models::TokenCategory;
use crate::storage::StorageBackend;

/// Configuration and storage shared by the orchestrators of one invocation
pub struct SyncSession<'a> {
    config: &'a SyncConfig,
    storage: &'a dyn StorageBackend,
}

impl<'a> SyncSession<'a> {
    pub fn new(config: &'a SyncConfig, storage: &'a dyn StorageBackend) -> Self {
        Self { config, storage }
    }

    pub fn config(&self) -> &SyncConfig {
        self.config
    }

    /// Categories enabled by the sync toggles
    pub fn categories(&self) -> Vec<TokenCategory> {
        self.config.sync.categories()
    }

    /// Load the enabled categories of the local store
    async fn load_local(&self) -> SyncResult<ModelLoadResult> {
        let loaded = ModelLoader::new(self.storage)
            .load_store(&self.config.tokens_dir, &self.categories())
            .await?;
        for path in &loaded.missing_files {
            warn!("Skipping missing token source {}", path);
        }
        Ok(loaded)
    }
}
