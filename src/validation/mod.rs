//! Validation functionality
//!
//! Provides reference validation for token stores:
//! - Missing reference targets
//! - Reference cycles (including self-references)

pub mod references;

pub use references::{ReferenceResolver, ResolutionResult, TokenKey, resolve_store};
