//! CLI configuration.
//!
//! Resolution order for the file: `--config`, then `ONRAMP_CONFIG`, then
//! `<config dir>/onramp/config.toml`. A missing file means defaults.
//! `ONRAMP_BACKEND_URL` and `ONRAMP_BACKEND_ANON_KEY` override whatever the
//! file says.

use std::path::{Path, PathBuf};

use onramp_client::BackendConfig;
use onramp_core::{Error, RequestMetadata, Result};
use serde::{Deserialize, Serialize};

/// Project name, used for the config directory and in hints.
pub const PROJECT_NAME: &str = "onramp";

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "ONRAMP_CONFIG";

/// Request metadata recorded on every new signup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// User agent to record
    pub user_agent: Option<String>,

    /// Referrer to record
    pub referrer: Option<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(concat!("onramp-cli/", env!("CARGO_PKG_VERSION")).to_string()),
            referrer: None,
        }
    }
}

/// Everything the `onramp` binary can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnrampConfig {
    /// Hosted backend endpoint
    pub backend: BackendConfig,

    /// Request metadata
    pub request: RequestConfig,
}

impl OnrampConfig {
    /// Config file path: explicit, then `ONRAMP_CONFIG`, then the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// `<config dir>/onramp/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Loads the config file (if any) and applies environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.backend = config.backend.with_env_overrides();
        Ok(config)
    }

    /// Parses one config file, without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses TOML; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serializes the config as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Metadata attached to new signup attempts.
    pub fn request_metadata(&self) -> RequestMetadata {
        RequestMetadata {
            user_agent: self.request.user_agent.clone(),
            referrer: self.request.referrer.clone(),
        }
    }
}
