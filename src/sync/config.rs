//! Sync configuration
//!
//! Loaded from an optional TOML file and overlaid by environment variables.
//! Only the credential and the file key are required; everything else has a
//! default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{SyncError, SyncResult};
use crate::models::{TokenCategory, TokenLayer};
use crate::remote::RetryPolicy;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "token-sync.toml";

pub const ENV_ACCESS_TOKEN: &str = "FIGMA_ACCESS_TOKEN";
pub const ENV_FILE_KEY: &str = "FIGMA_FILE_KEY";
pub const ENV_API_BASE: &str = "FIGMA_API_BASE";
pub const ENV_TOKENS_DIR: &str = "TOKEN_SYNC_TOKENS_DIR";
pub const ENV_GENERATED_DIR: &str = "TOKEN_SYNC_GENERATED_DIR";
pub const ENV_STUDIO_DIR: &str = "TOKEN_SYNC_STUDIO_DIR";
pub const ENV_TIMEOUT_SECS: &str = "TOKEN_SYNC_TIMEOUT_SECS";

/// Per-category sync toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncToggles {
    #[serde(default = "default_true")]
    pub colors: bool,
    #[serde(default = "default_true")]
    pub typography: bool,
    #[serde(default = "default_true")]
    pub spacing: bool,
    #[serde(default = "default_true")]
    pub elevation: bool,
    #[serde(default = "default_true")]
    pub motion: bool,
    /// Gates the component layer of every category
    #[serde(default = "default_true")]
    pub components: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SyncToggles {
    fn default() -> Self {
        Self {
            colors: true,
            typography: true,
            spacing: true,
            elevation: true,
            motion: true,
            components: true,
        }
    }
}

impl SyncToggles {
    pub fn includes(&self, category: TokenCategory) -> bool {
        match category {
            TokenCategory::Colors => self.colors,
            TokenCategory::Typography => self.typography,
            TokenCategory::Spacing => self.spacing,
            TokenCategory::Elevation => self.elevation,
            TokenCategory::Motion => self.motion,
        }
    }

    pub fn includes_layer(&self, layer: TokenLayer) -> bool {
        layer != TokenLayer::Component || self.components
    }

    /// Enabled categories in canonical order
    pub fn categories(&self) -> Vec<TokenCategory> {
        TokenCategory::ALL
            .into_iter()
            .filter(|c| self.includes(*c))
            .collect()
    }
}

/// Remote collection name per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
    #[serde(default = "default_colors_collection")]
    pub colors: String,
    #[serde(default = "default_typography_collection")]
    pub typography: String,
    #[serde(default = "default_spacing_collection")]
    pub spacing: String,
    #[serde(default = "default_elevation_collection")]
    pub elevation: String,
    #[serde(default = "default_motion_collection")]
    pub motion: String,
}

fn default_colors_collection() -> String {
    "Colors".to_string()
}

fn default_typography_collection() -> String {
    "Typography".to_string()
}

fn default_spacing_collection() -> String {
    "Spacing".to_string()
}

fn default_elevation_collection() -> String {
    "Effects".to_string()
}

fn default_motion_collection() -> String {
    "Motion".to_string()
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            colors: default_colors_collection(),
            typography: default_typography_collection(),
            spacing: default_spacing_collection(),
            elevation: default_elevation_collection(),
            motion: default_motion_collection(),
        }
    }
}

impl CollectionNames {
    pub fn name(&self, category: TokenCategory) -> &str {
        match category {
            TokenCategory::Colors => &self.colors,
            TokenCategory::Typography => &self.typography,
            TokenCategory::Spacing => &self.spacing,
            TokenCategory::Elevation => &self.elevation,
            TokenCategory::Motion => &self.motion,
        }
    }
}

/// Configuration for one sync invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Personal access token for the remote API
    #[serde(default)]
    pub access_token: String,

    /// Key of the remote file holding the variables
    #[serde(default)]
    pub file_key: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Directory of the category source files
    #[serde(default = "default_tokens_dir")]
    pub tokens_dir: String,

    /// Directory of the generated TypeScript modules
    #[serde(default = "default_generated_dir")]
    pub generated_dir: String,

    /// Directory of the leaf-format (Tokens Studio) files
    #[serde(default = "default_studio_dir")]
    pub studio_dir: String,

    /// Per-request timeout; none waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub sync: SyncToggles,

    #[serde(default)]
    pub collections: CollectionNames,

    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_api_base() -> String {
    "https://api.figma.com/v1".to_string()
}

fn default_tokens_dir() -> String {
    "tokens".to_string()
}

fn default_generated_dir() -> String {
    "generated".to_string()
}

fn default_studio_dir() -> String {
    "tokens/tokens-studio".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            file_key: String::new(),
            api_base: default_api_base(),
            tokens_dir: default_tokens_dir(),
            generated_dir: default_generated_dir(),
            studio_dir: default_studio_dir(),
            timeout_secs: None,
            sync: SyncToggles::default(),
            collections: CollectionNames::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl SyncConfig {
    /// Parse a TOML document
    pub fn from_toml(text: &str) -> SyncResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`, or the default file if present. A missing explicit path
    /// is an error; a missing default file yields the defaults.
    pub fn from_file(path: Option<&Path>) -> SyncResult<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(SyncError::filesystem(path.display().to_string(), e.to_string())),
        }
    }

    /// Load the file configuration and overlay the process environment
    pub fn load(path: Option<&Path>) -> SyncResult<Self> {
        Self::from_file(path)?.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from environment lookups only
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        Self::default().with_env_lookup(lookup)
    }

    /// Overlay values found through `lookup`. Empty values are ignored.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_ACCESS_TOKEN) {
            self.access_token = v;
        }
        if let Some(v) = get(ENV_FILE_KEY) {
            self.file_key = v;
        }
        if let Some(v) = get(ENV_API_BASE) {
            self.api_base = v;
        }
        if let Some(v) = get(ENV_TOKENS_DIR) {
            self.tokens_dir = v;
        }
        if let Some(v) = get(ENV_GENERATED_DIR) {
            self.generated_dir = v;
        }
        if let Some(v) = get(ENV_STUDIO_DIR) {
            self.studio_dir = v;
        }
        if let Some(v) = get(ENV_TIMEOUT_SECS) {
            let secs = v.trim().parse::<u64>().map_err(|_| {
                SyncError::ConfigInvalid(vec![format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, v
                )])
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    pub fn with_credentials(mut self, access_token: impl Into<String>, file_key: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self.file_key = file_key.into();
        self
    }

    pub fn with_tokens_dir(mut self, dir: impl Into<String>) -> Self {
        self.tokens_dir = dir.into();
        self
    }

    pub fn with_toggles(mut self, toggles: SyncToggles) -> Self {
        self.sync = toggles;
        self
    }

    /// Messages for every missing required value
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.access_token.trim().is_empty() {
            errors.push(format!("{} is not set", ENV_ACCESS_TOKEN));
        }
        if self.file_key.trim().is_empty() {
            errors.push(format!("{} is not set", ENV_FILE_KEY));
        }
        errors
    }

    /// Fail with `ConfigInvalid` unless the remote settings are complete
    pub fn validate(&self) -> SyncResult<()> {
        let errors = self.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SyncError::ConfigInvalid(errors))
        }
    }
}
