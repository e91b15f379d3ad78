//! Model loading functionality
//!
//! Loads the token store from `<tokens_dir>/<category>.json` and leaf-format
//! documents from `<studio_dir>/<layer dir>/<category>.json`. A missing file
//! only affects its own category: it is reported and loading continues.

use tracing::{debug, info, warn};

use crate::export::studio::{StudioDocument, studio_path};
use crate::models::{CategoryTokens, TokenCategory, TokenLayer, TokenStore, TransformWarning};
use crate::storage::{StorageBackend, StorageError, join_path};

/// Model loader that uses a storage backend
pub struct ModelLoader<'a, B: StorageBackend + ?Sized> {
    storage: &'a B,
}

impl<'a, B: StorageBackend + ?Sized> ModelLoader<'a, B> {
    /// Create a new model loader with the given storage backend
    pub fn new(storage: &'a B) -> Self {
        Self { storage }
    }

    /// Load one category source file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub async fn load_category(
        &self,
        tokens_dir: &str,
        category: TokenCategory,
    ) -> Result<Option<(CategoryTokens, Vec<TransformWarning>)>, StorageError> {
        let path = join_path(tokens_dir, &category.file_name());
        if !self.storage.file_exists(&path).await? {
            return Ok(None);
        }
        let document = self.storage.read_json(&path).await?;
        debug!("Parsing {}", path);
        Ok(Some(CategoryTokens::from_source_json(category, &document)))
    }

    /// Load the store for the given categories.
    ///
    /// Missing files are listed in the result and the category is left empty.
    pub async fn load_store(
        &self,
        tokens_dir: &str,
        categories: &[TokenCategory],
    ) -> Result<ModelLoadResult, StorageError> {
        let mut result = ModelLoadResult::default();

        for &category in categories {
            match self.load_category(tokens_dir, category).await? {
                Some((tokens, warnings)) => {
                    for warning in &warnings {
                        warning.log();
                    }
                    result.warnings.extend(warnings);
                    result.store.insert(category, tokens);
                }
                None => {
                    let path = join_path(tokens_dir, &category.file_name());
                    warn!("Token source {} not found; treating {} as empty", path, category);
                    result.missing_files.push(path);
                    result.store.insert(category, CategoryTokens::default());
                }
            }
        }

        info!(
            "Loaded {} tokens in {} categories from {}",
            result.store.token_count(),
            categories.len() - result.missing_files.len(),
            tokens_dir
        );
        Ok(result)
    }

    /// Load every leaf-format document present for the given categories
    pub async fn load_studio(
        &self,
        studio_dir: &str,
        categories: &[TokenCategory],
    ) -> Result<StudioLoadResult, StorageError> {
        let mut result = StudioLoadResult::default();

        for &category in categories {
            for layer in TokenLayer::ALL {
                let path = join_path(studio_dir, &studio_path(layer, category));
                if !self.storage.file_exists(&path).await? {
                    debug!("No leaf-format file at {}", path);
                    result.missing_files.push(path);
                    continue;
                }
                let content = self.storage.read_json(&path).await?;
                result.documents.push(StudioDocument {
                    category,
                    layer,
                    content,
                });
            }
        }

        info!(
            "Loaded {} leaf-format documents from {}",
            result.documents.len(),
            studio_dir
        );
        Ok(result)
    }
}

/// Result of loading the token store
#[derive(Debug, Clone, Default)]
pub struct ModelLoadResult {
    pub store: TokenStore,
    pub warnings: Vec<TransformWarning>,
    /// Source files that did not exist
    pub missing_files: Vec<String>,
}

/// Leaf-format documents read from the studio directory
#[derive(Debug, Clone, Default)]
pub struct StudioLoadResult {
    pub documents: Vec<StudioDocument>,
    pub missing_files: Vec<String>,
}
