//! Recoverable per-token problems
//!
//! A malformed token never aborts a sync run: the transformer substitutes a
//! degraded value (or skips the token), records one of these warnings and
//! carries on. Reports collect them and the CLI prints them.

use std::fmt;

use super::token::TokenPath;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformWarning {
    /// Color literal that could not be parsed; the black sentinel was used
    MalformedColor { path: String, value: String },
    /// Reference whose target does not exist; the raw reference was kept
    UnresolvedReference { path: String, reference: String },
    /// Reference participating in a cycle; the raw reference was kept
    ReferenceCycle { path: String, cycle: Vec<String> },
    /// Value of a numeric token type that is not a number; the token was skipped
    NonNumeric { path: String, value: String },
    /// Remote variable whose name maps to no token category
    UnclassifiedVariable { name: String },
    /// Source value that is neither a scalar nor a group
    SkippedLeaf { path: String, reason: String },
}

impl TransformWarning {
    pub fn malformed_color(path: &TokenPath, value: &str) -> Self {
        TransformWarning::MalformedColor {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    pub fn non_numeric(path: &TokenPath, value: &str) -> Self {
        TransformWarning::NonNumeric {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    /// Emit the warning through `tracing`
    pub fn log(&self) {
        tracing::warn!("{}", self);
    }
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformWarning::MalformedColor { path, value } => {
                write!(f, "Invalid color at {}: {:?} (using black)", path, value)
            }
            TransformWarning::UnresolvedReference { path, reference } => {
                write!(f, "Unresolved reference at {}: {}", path, reference)
            }
            TransformWarning::ReferenceCycle { path, cycle } => {
                write!(f, "Reference cycle at {}: {}", path, cycle.join(" -> "))
            }
            TransformWarning::NonNumeric { path, value } => {
                write!(f, "Non-numeric value at {}: {:?} (skipped)", path, value)
            }
            TransformWarning::UnclassifiedVariable { name } => {
                write!(f, "Variable {} matches no token category (ignored)", name)
            }
            TransformWarning::SkippedLeaf { path, reason } => {
                write!(f, "Skipped {}: {}", path, reason)
            }
        }
    }
}
