//! HTTP client for the Figma variables API
//!
//! ```ignore
//! use token_sync::remote::FigmaClient;
//!
//! let client = FigmaClient::new("https://api.figma.com/v1", token, file_key)
//!     .with_timeout(Some(30));
//! let variables = client.local_variables().await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::VariablesApi;
use super::retry::RetryPolicy;
use crate::models::{BatchResponse, VariablesBatch, VariablesResponse};
use crate::sync::config::SyncConfig;
use crate::sync::error::{SyncError, SyncResult};

const TOKEN_HEADER: &str = "X-Figma-Token";

/// Variables API client bound to one file
#[derive(Debug, Clone)]
pub struct FigmaClient {
    base_url: String,
    access_token: String,
    file_key: String,
    timeout_seconds: Option<u64>,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl FigmaClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        file_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            file_key: file_key.into(),
            timeout_seconds: None,
            retry: RetryPolicy::default(),
            client: reqwest::Client::new(),
        }
    }

    /// Client configured from a validated [`SyncConfig`]
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        config.validate()?;
        Ok(Self::new(&config.api_base, &config.access_token, &config.file_key)
            .with_timeout(config.timeout_secs)
            .with_retry(config.retry.clone()))
    }

    /// Set a per-request timeout; `None` waits indefinitely
    pub fn with_timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/files/{}/variables{}",
            self.base_url,
            urlencoding::encode(&self.file_key),
            suffix
        )
    }

    fn headers(&self) -> SyncResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&self.access_token).map_err(|_| {
            SyncError::ConfigInvalid(vec![
                "FIGMA_ACCESS_TOKEN contains characters not allowed in a header".to_string(),
            ])
        })?;
        headers.insert(TOKEN_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn build_request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> SyncResult<reqwest::RequestBuilder> {
        let mut request = self.client.request(method, url).headers(self.headers()?);
        if let Some(secs) = self.timeout_seconds {
            request = request.timeout(Duration::from_secs(secs));
        }
        Ok(request)
    }

    /// Only a failed connect proves the request never left this process
    fn map_send_error(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.timeout_seconds.unwrap_or_default())
        } else if err.is_connect() {
            SyncError::Network(format!("Failed to connect to {}: {}", self.base_url, err))
        } else {
            SyncError::Interrupted(err.to_string())
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> SyncResult<T> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| SyncError::Interrupted(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| SyncError::InvalidResponse(e.to_string()))
    }

    async fn get_variables(&self, suffix: &str) -> SyncResult<VariablesResponse> {
        let url = self.url(suffix);
        self.retry
            .run(&format!("GET {}", url), SyncError::is_retryable, || async {
                tracing::debug!("GET {}", url);
                let request = self.build_request(reqwest::Method::GET, &url)?;
                self.send(request).await
            })
            .await
    }
}

#[async_trait]
impl VariablesApi for FigmaClient {
    async fn local_variables(&self) -> SyncResult<VariablesResponse> {
        self.get_variables("/local").await
    }

    async fn published_variables(&self) -> SyncResult<VariablesResponse> {
        self.get_variables("/published").await
    }

    async fn post_variables(&self, batch: &VariablesBatch) -> SyncResult<BatchResponse> {
        let url = self.url("");
        let body = serde_json::to_vec(batch)?;
        tracing::debug!(
            "POST {} ({} collections, {} variables, {} values, {} bytes)",
            url,
            batch.variable_collections.len(),
            batch.variables.len(),
            batch.variable_mode_values.len(),
            body.len()
        );

        // Only resent when the server cannot have applied it
        self.retry
            .run(&format!("POST {}", url), SyncError::is_retryable_write, || async {
                let request = self
                    .build_request(reqwest::Method::POST, &url)?
                    .body(body.clone());
                self.send(request).await
            })
            .await
    }
}
