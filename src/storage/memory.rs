//! In-memory storage backend
//!
//! Holds files in a map keyed by normalized path and counts every mutating
//! call, so callers can assert that a run never touched storage.

use super::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryStorageBackend {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl MemoryStorageBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without counting it as a write
    pub fn with_file(self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(normalize(path), content.into());
        }
        self
    }

    /// Number of write calls made so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Paths of all stored files, sorted
    pub fn paths(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Contents of a stored file as UTF-8
    pub fn contents(&self, path: &str) -> Option<String> {
        let files = self.files.lock().ok()?;
        files
            .get(&normalize(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, StorageError> {
        self.files
            .lock()
            .map_err(|_| StorageError::IoError("memory storage lock poisoned".to_string()))
    }
}

#[async_trait(?Send)]
impl StorageBackend for MemoryStorageBackend {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.lock()?
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| StorageError::FileNotFound(path.to_string()))
    }

    async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock()?.insert(normalize(path), content.to_vec());
        Ok(())
    }

    async fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.lock()?.contains_key(&normalize(path)))
    }
}
