//! Command handlers

pub mod diff;
pub mod export;
pub mod import;
pub mod studio;

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::remote::FigmaClient;
use crate::storage::filesystem::FileSystemStorageBackend;
use crate::sync::{SyncConfig, SyncSession};

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file; `token-sync.toml` in the project root if absent
    pub config: Option<PathBuf>,
    /// Project root all configured directories are relative to
    pub root: PathBuf,
    /// Overrides the configured tokens directory
    pub tokens_dir: Option<String>,
}

impl GlobalOptions {
    /// Configuration file to read: `--config` (relative paths are taken
    /// from the project root), else `token-sync.toml` in the root if present
    pub fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) if path.is_relative() => Some(self.root.join(path)),
            Some(path) => Some(path.clone()),
            None => {
                let default_file = self.root.join(crate::sync::config::DEFAULT_CONFIG_FILE);
                default_file.exists().then_some(default_file)
            }
        }
    }

    /// `.env` file holding the credentials
    pub fn env_file(&self) -> PathBuf {
        self.root.join(".env")
    }
}

/// Configuration and storage for one invocation
pub struct CommandContext {
    pub config: SyncConfig,
    pub storage: FileSystemStorageBackend,
}

impl CommandContext {
    pub fn load(options: &GlobalOptions) -> Result<Self, CliError> {
        if !options.root.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "project root {} is not a directory",
                options.root.display()
            )));
        }
        let env_file = options.env_file();
        if dotenvy::from_path(&env_file).is_ok() {
            tracing::debug!(path = %env_file.display(), "Loaded environment file");
        }
        let mut config = match options.config_path() {
            Some(path) => SyncConfig::load(Some(path.as_path()))?,
            None => SyncConfig::from_lookup(|key| std::env::var(key).ok())?,
        };
        if let Some(dir) = &options.tokens_dir {
            config = config.with_tokens_dir(dir.clone());
        }
        tracing::debug!(root = %options.root.display(), "Using project root");

        Ok(Self {
            config,
            storage: FileSystemStorageBackend::new(&options.root),
        })
    }

    pub fn session(&self) -> SyncSession<'_> {
        SyncSession::new(&self.config, &self.storage)
    }

    /// HTTP client for the remote commands. Fails with the configuration
    /// errors before any request can be made.
    pub fn client(&self) -> Result<FigmaClient, CliError> {
        Ok(FigmaClient::from_config(&self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_resolve_against_root() {
        let temp = TempDir::new().unwrap();
        let mut options = GlobalOptions {
            root: temp.path().to_path_buf(),
            ..Default::default()
        };
        assert_eq!(options.config_path(), None);
        assert_eq!(options.env_file(), temp.path().join(".env"));

        std::fs::write(temp.path().join("token-sync.toml"), "").unwrap();
        assert_eq!(options.config_path(), Some(temp.path().join("token-sync.toml")));

        options.config = Some(PathBuf::from("config/sync.toml"));
        assert_eq!(options.config_path(), Some(temp.path().join("config/sync.toml")));

        let absolute = temp.path().join("elsewhere.toml");
        options.config = Some(absolute.clone());
        assert_eq!(options.config_path(), Some(absolute));
    }
}
