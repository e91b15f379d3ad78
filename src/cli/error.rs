//! CLI error type

use crate::sync::error::SyncError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Message printed before exiting
    pub fn user_message(&self) -> String {
        match self {
            CliError::Sync(err) => err.user_message(),
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sync(err) => err.exit_code(),
            _ => 1,
        }
    }
}
