//! Export functionality
//!
//! Transformer export direction, from the internal token tree to:
//! - Leaf-format JSON (Tokens Studio)
//! - Remote variable creation batches
//! - Generated TypeScript modules

pub mod studio;
pub mod typescript;
pub mod variables;

pub use studio::{StudioDocument, StudioExporter, studio_path};
pub use typescript::TypeScriptExporter;
pub use variables::{CategoryCount, VariablesExport, VariablesExporter, variable_name};
