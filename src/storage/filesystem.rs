//! File system storage backend
//!
//! Every path is resolved against a base directory (the project root when
//! run from the CLI). Paths containing `..`, or resolving outside the base
//! directory through symlinks, are rejected.

use super::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File system storage backend
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

impl FileSystemStorageBackend {
    /// Create a backend rooted at `base_path`
    ///
    /// ```rust
    /// use token_sync::storage::filesystem::FileSystemStorageBackend;
    ///
    /// let backend = FileSystemStorageBackend::new(".");
    /// assert_eq!(backend.base_path(), std::path::Path::new("."));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn canonical_base(&self) -> PathBuf {
        self.base_path
            .canonicalize()
            .unwrap_or_else(|_| self.base_path.clone())
    }

    fn ensure_contained(&self, candidate: &Path) -> Result<(), StorageError> {
        let canonical = candidate
            .canonicalize()
            .map_err(|e| StorageError::IoError(format!("Failed to resolve path: {}", e)))?;
        if canonical.starts_with(self.canonical_base()) {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied(
                "Path escapes base directory".to_string(),
            ))
        }
    }

    /// Resolve `path` under the base directory
    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = path.trim_start_matches('/');
        if relative.contains("..") {
            return Err(StorageError::PermissionDenied(
                "Path traversal (..) not allowed".to_string(),
            ));
        }

        let full = self.base_path.join(relative);
        if full.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(StorageError::PermissionDenied(
                "Path traversal not allowed".to_string(),
            ));
        }

        if full.exists() {
            self.ensure_contained(&full)?;
        } else if let Some(parent) = full.parent()
            && parent.exists()
        {
            self.ensure_contained(parent)?;
        }
        Ok(full)
    }
}

/// Map an io error, keeping not-found distinct
fn io_error(err: std::io::Error, path: &str, action: &str) -> StorageError {
    if err.kind() == ErrorKind::NotFound {
        StorageError::FileNotFound(path.to_string())
    } else {
        StorageError::IoError(format!("Failed to {} {}: {}", action, path, err))
    }
}

#[async_trait(?Send)]
impl StorageBackend for FileSystemStorageBackend {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve_path(path)?;
        debug!("Reading {}", full_path.display());
        fs::read(&full_path)
            .await
            .map_err(|e| io_error(e, path, "read"))
    }

    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(e, path, "create directory for"))?;
        }
        debug!("Writing {} ({} bytes)", full_path.display(), content.len());
        fs::write(&full_path, content)
            .await
            .map_err(|e| io_error(e, path, "write"))
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve_path(path)?;
        match fs::metadata(&full_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(e, path, "stat")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_traversal_blocked() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        let result = backend.resolve_path("../secrets/.env");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        let result = backend.resolve_path("/tokens/../../outside.json");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        assert!(backend.resolve_path("tokens/colors.json").is_ok());
        assert!(backend.resolve_path("/generated/colors.ts").is_ok());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        backend
            .write_file("tokens/tokens-studio/core/colors.json", b"{}")
            .await
            .unwrap();
        assert!(temp.path().join("tokens/tokens-studio/core").is_dir());
        assert!(
            backend
                .file_exists("tokens/tokens-studio/core/colors.json")
                .await
                .unwrap()
        );
        assert!(!backend.file_exists("tokens/tokens-studio/core").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        let err = backend.read_file("tokens/motion.json").await.unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound(_)));
        assert!(!backend.file_exists("tokens/motion.json").await.unwrap());
    }
}
