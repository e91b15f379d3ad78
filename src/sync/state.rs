//! Run state machine
//!
//! ```text
//! Idle -> ValidatingConfig -> Failed
//!                          -> Fetching | Transforming
//! Fetching -> Transforming -> Submitting | Writing -> Succeeded
//! any non-terminal state -> Failed
//! ```

use serde::Serialize;
use std::fmt;

use super::error::{SyncError, SyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    ValidatingConfig,
    Fetching,
    Transforming,
    Submitting,
    Writing,
    Succeeded,
    Failed,
}

impl SyncPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncPhase::Succeeded | SyncPhase::Failed)
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: SyncPhase) -> bool {
        use SyncPhase::*;
        if next == Failed {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Idle, ValidatingConfig)
                | (ValidatingConfig, Fetching)
                | (ValidatingConfig, Transforming)
                | (Fetching, Transforming)
                | (Transforming, Submitting)
                | (Transforming, Writing)
                | (Transforming, Succeeded)
                | (Submitting, Succeeded)
                | (Writing, Succeeded)
        )
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPhase::Idle => "idle",
            SyncPhase::ValidatingConfig => "validating config",
            SyncPhase::Fetching => "fetching",
            SyncPhase::Transforming => "transforming",
            SyncPhase::Submitting => "submitting",
            SyncPhase::Writing => "writing",
            SyncPhase::Succeeded => "succeeded",
            SyncPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Phase history of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRun {
    history: Vec<SyncPhase>,
}

impl Default for SyncRun {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncRun {
    pub fn new() -> Self {
        Self {
            history: vec![SyncPhase::Idle],
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.history.last().copied().unwrap_or(SyncPhase::Idle)
    }

    pub fn history(&self) -> &[SyncPhase] {
        &self.history
    }

    /// Move to `next`, rejecting illegal transitions
    pub fn advance(&mut self, next: SyncPhase) -> SyncResult<()> {
        let current = self.phase();
        if !current.can_transition_to(next) {
            return Err(SyncError::InvalidState(format!("{} -> {}", current, next)));
        }
        tracing::debug!("Sync phase: {} -> {}", current, next);
        self.history.push(next);
        Ok(())
    }

    /// Record a failure and hand the error back for propagation
    pub fn fail(&mut self, err: SyncError) -> SyncError {
        if !self.phase().is_terminal() {
            self.history.push(SyncPhase::Failed);
        }
        err
    }

    /// Run a fallible step, recording `Failed` if it errors
    pub fn guard<T>(&mut self, result: SyncResult<T>) -> SyncResult<T> {
        result.map_err(|e| self.fail(e))
    }
}
