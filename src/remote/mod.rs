//! Remote Sync Client
//!
//! [`VariablesApi`] is the seam between the orchestrators and the design
//! tool's variables endpoints. `FigmaClient` implements it over HTTP; tests
//! substitute an in-memory implementation.

use async_trait::async_trait;

use crate::models::{BatchResponse, VariablesBatch, VariablesResponse};
use crate::sync::error::SyncResult;

pub mod retry;

#[cfg(feature = "api-backend")]
pub mod client;

#[cfg(feature = "api-backend")]
pub use client::FigmaClient;
pub use retry::RetryPolicy;

/// Variables resource of one remote file
#[async_trait]
pub trait VariablesApi: Send + Sync {
    /// All local variables and collections of the file
    async fn local_variables(&self) -> SyncResult<VariablesResponse>;

    /// Variables published from the file's library
    async fn published_variables(&self) -> SyncResult<VariablesResponse>;

    /// Submit a batch of create/update/delete actions
    async fn post_variables(&self, batch: &VariablesBatch) -> SyncResult<BatchResponse>;
}

/// A mock variables API for testing
#[cfg(test)]
pub struct MockVariablesApi {
    pub response: VariablesResponse,
    pub calls: std::sync::atomic::AtomicUsize,
    pub posted: std::sync::Mutex<Vec<VariablesBatch>>,
}

#[cfg(test)]
impl MockVariablesApi {
    pub fn new(response: VariablesResponse) -> Self {
        Self {
            response,
            calls: std::sync::atomic::AtomicUsize::new(0),
            posted: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl VariablesApi for MockVariablesApi {
    async fn local_variables(&self) -> SyncResult<VariablesResponse> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.response.clone())
    }

    async fn published_variables(&self) -> SyncResult<VariablesResponse> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.response.clone())
    }

    async fn post_variables(&self, batch: &VariablesBatch) -> SyncResult<BatchResponse> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Ok(mut posted) = self.posted.lock() {
            posted.push(batch.clone());
        }
        Ok(BatchResponse {
            status: 200,
            ..Default::default()
        })
    }
}
