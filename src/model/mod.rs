//! Token store loading and saving
//!
//! Provides high-level operations for reading category sources and
//! leaf-format files, and for writing sources, generated modules and
//! leaf-format files, all through a storage backend.

pub mod loader;
pub mod saver;

pub use loader::{ModelLoadResult, ModelLoader, StudioLoadResult};
pub use saver::ModelSaver;
