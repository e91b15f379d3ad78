//! Storage backend abstraction
//!
//! Token sources, leaf-format files and generated modules are all read and
//! written through [`StorageBackend`]:
//! - `FileSystemStorageBackend`: native file system rooted at a base directory
//! - `MemoryStorageBackend`: in-memory map used by tests and dry runs

use async_trait::async_trait;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Paths are `/`-separated and relative to the backend's root.
#[async_trait(?Send)]
pub trait StorageBackend: Send + Sync {
    /// Read a file from storage
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file, creating parent directories as needed
    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Check whether a regular file exists at `path`
    async fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Read a UTF-8 text file
    async fn read_text(&self, path: &str) -> Result<String, StorageError> {
        let bytes = self.read_file(path).await?;
        String::from_utf8(bytes)
            .map_err(|e| StorageError::SerializationError(format!("{} is not UTF-8: {}", path, e)))
    }

    /// Read and parse a JSON file
    async fn read_json(&self, path: &str) -> Result<serde_json::Value, StorageError> {
        let text = self.read_text(path).await?;
        serde_json::from_str(&text)
            .map_err(|e| StorageError::SerializationError(format!("Invalid JSON in {}: {}", path, e)))
    }

    /// Write a JSON value pretty-printed with a trailing newline
    async fn write_json(&self, path: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let mut text = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(format!("{}: {}", path, e)))?;
        text.push('\n');
        self.write_file(path, text.as_bytes()).await
    }
}

/// Join path segments with `/`, skipping empty ones
pub fn join_path(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name.trim_start_matches('/'))
    }
}

#[cfg(feature = "native-fs")]
pub mod filesystem;

pub mod memory;
