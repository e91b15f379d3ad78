//! Error types for sync runs
//!
//! Fatal failures abort the current run and surface to the caller as
//! [`SyncError`]. Per-token problems are not errors: they are recorded as
//! [`TransformWarning`]s and the run continues.

use thiserror::Error;

use crate::storage::StorageError;

pub use crate::models::TransformWarning;

/// Errors that abort a sync run
#[derive(Error, Debug)]
pub enum SyncError {
    /// Required configuration is missing; nothing was read or sent
    #[error("Invalid configuration: {}", .0.join("; "))]
    ConfigInvalid(Vec<String>),

    /// Remote API answered with a non-success status
    #[error("Remote API error (HTTP {status}): {body}")]
    Transport { status: u16, body: String },

    /// Request never reached the remote API
    #[error("Network error: {0}")]
    Network(String),

    /// Request failed after it was sent; the server may have applied it
    #[error("Request interrupted: {0}")]
    Interrupted(String),

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Remote API answered with a body that could not be understood
    #[error("Invalid response from remote API: {0}")]
    InvalidResponse(String),

    /// Reading or writing a file failed
    #[error("Filesystem error at {path}: {message}")]
    Filesystem { path: String, message: String },

    /// Encoding or decoding a document failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Run state machine was driven through an illegal transition
    #[error("Invalid sync state transition: {0}")]
    InvalidState(String),
}

impl From<StorageError> for SyncError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::FileNotFound(path) => SyncError::Filesystem {
                path,
                message: "file not found".to_string(),
            },
            StorageError::SerializationError(msg) => SyncError::Serialization(msg),
            other => SyncError::Filesystem {
                path: String::new(),
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigInvalid(vec![format!("Invalid configuration file: {}", err)])
    }
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Filesystem error for `path`
    pub fn filesystem(path: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError::Filesystem {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            SyncError::ConfigInvalid(errors) => {
                let list: String = errors.iter().map(|e| format!("  - {e}\n")).collect();
                format!(
                    "Configuration is incomplete:\n{list}\n\
                    Hints:\n\
                    - Set FIGMA_ACCESS_TOKEN (figma.com/settings > Personal access tokens)\n\
                    - Set FIGMA_FILE_KEY (the id in figma.com/file/<FILE_KEY>/...)\n\
                    - Both can live in a .env file next to token-sync.toml"
                )
            }
            SyncError::Transport { status: 401 | 403, body } => {
                format!(
                    "The remote API rejected the credentials: {body}\n\n\
                    Hints:\n\
                    - Check that FIGMA_ACCESS_TOKEN is valid and not expired\n\
                    - The token needs the Variables read and write scopes"
                )
            }
            SyncError::Transport { status: 404, .. } => {
                "File not found on the remote API.\n\n\
                Hint: Check FIGMA_FILE_KEY."
                    .to_string()
            }
            SyncError::Transport { status: 429, .. } => {
                "Rate limited by the remote API.\n\n\
                Hint: Wait a minute and try again."
                    .to_string()
            }
            SyncError::Network(msg) => {
                format!(
                    "Failed to reach the remote API: {msg}\n\n\
                    Hints:\n\
                    - Check your internet connection\n\
                    - Verify FIGMA_API_BASE if you set it"
                )
            }
            SyncError::Interrupted(msg) => {
                format!(
                    "The connection to the remote API broke mid-request: {msg}\n\n\
                    Hint: An export may already have been applied. Run `token-sync diff` before exporting again."
                )
            }
            SyncError::Timeout(secs) => {
                format!(
                    "Request timed out after {secs} seconds.\n\n\
                    Hint: Increase TOKEN_SYNC_TIMEOUT_SECS or try again later."
                )
            }
            SyncError::Filesystem { path, message } if !path.is_empty() => {
                format!("Could not access {path}: {message}")
            }
            _ => self.to_string(),
        }
    }

    /// Check if this error is worth retrying for an idempotent request
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Network(_) | SyncError::Interrupted(_) | SyncError::Timeout(_) => true,
            SyncError::Transport { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if a non-idempotent request can safely be sent again: only when
    /// the connection was never established or the server refused it (429)
    pub fn is_retryable_write(&self) -> bool {
        matches!(
            self,
            SyncError::Network(_) | SyncError::Transport { status: 429, .. }
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::ConfigInvalid(vec![
            "FIGMA_ACCESS_TOKEN is not set".to_string(),
            "FIGMA_FILE_KEY is not set".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: FIGMA_ACCESS_TOKEN is not set; FIGMA_FILE_KEY is not set"
        );

        let err = SyncError::Transport {
            status: 500,
            body: "oops".to_string(),
        };
        assert_eq!(err.to_string(), "Remote API error (HTTP 500): oops");
    }

    #[test]
    fn test_retry_classification() {
        assert!(SyncError::Network("refused".into()).is_retryable());
        assert!(SyncError::Timeout(30).is_retryable());
        assert!(SyncError::Transport { status: 503, body: String::new() }.is_retryable());
        assert!(!SyncError::Transport { status: 400, body: String::new() }.is_retryable());
        assert!(!SyncError::ConfigInvalid(vec![]).is_retryable());

        assert!(SyncError::Transport { status: 429, body: String::new() }.is_retryable_write());
        assert!(!SyncError::Transport { status: 502, body: String::new() }.is_retryable_write());
        assert!(!SyncError::Timeout(30).is_retryable_write());
    }

    #[test]
    fn test_interrupted_write_is_not_resent() {
        let refused = SyncError::Network("connection refused".into());
        let reset = SyncError::Interrupted("connection reset by peer".into());
        assert!(refused.is_retryable_write());
        assert!(reset.is_retryable());
        assert!(!reset.is_retryable_write());
    }

    #[test]
    fn test_error_from_storage() {
        let err: SyncError = StorageError::FileNotFound("tokens/colors.json".into()).into();
        assert!(matches!(err, SyncError::Filesystem { ref path, .. } if path == "tokens/colors.json"));
    }

    #[test]
    fn test_error_from_serde() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SyncError = json_err.into();
        assert!(matches!(err, SyncError::Serialization(_)));
    }

    #[test]
    fn test_user_message_lists_config_errors() {
        let err = SyncError::ConfigInvalid(vec!["FIGMA_FILE_KEY is not set".to_string()]);
        assert!(err.user_message().contains("  - FIGMA_FILE_KEY is not set"));
    }
}
