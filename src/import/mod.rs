//! Import functionality
//!
//! Transformer import direction, into the internal token tree from:
//! - Leaf-format JSON (Tokens Studio)
//! - Remote variables

pub mod studio;
pub mod variables;

pub use studio::StudioImporter;
pub use variables::{Classification, ImportedVariable, VariablesImport, VariablesImporter};
