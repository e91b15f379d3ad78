//! Token Sync - design token store with bidirectional sync
//!
//! Provides unified interfaces for:
//! - Token store loading/saving (via storage backends)
//! - Reference resolution with cycle detection
//! - Transformation to and from Tokens Studio leaf-format JSON
//! - Remote variable export/import through the Figma variables API
//! - Structural diffs between token snapshots
//! - Generated TypeScript token modules

pub mod convert;
pub mod diff;
pub mod export;
pub mod import;
pub mod model;
pub mod models;
pub mod remote;
pub mod storage;
pub mod sync;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use storage::{StorageBackend, StorageError};
#[cfg(feature = "native-fs")]
pub use storage::filesystem::FileSystemStorageBackend;
pub use storage::memory::MemoryStorageBackend;

pub use model::{ModelLoader, ModelSaver};
pub use export::{StudioExporter, TypeScriptExporter, VariablesExporter};
pub use import::{StudioImporter, VariablesImporter};
pub use diff::{TokenDiff, compare};
pub use validation::{ReferenceResolver, ResolutionResult, resolve_store};

#[cfg(feature = "api-backend")]
pub use remote::FigmaClient;
pub use remote::{RetryPolicy, VariablesApi};

// Re-export models
pub use models::{
    CategoryTokens, Token, TokenCategory, TokenLayer, TokenPath, TokenStore, TokenTree, TokenType,
    TokenValue, TransformWarning,
};

// Re-export sync types
pub use sync::{SyncConfig, SyncError, SyncResult, SyncSession};
