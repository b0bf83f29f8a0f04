//! Backend endpoint configuration.

use std::time::Duration;

use onramp_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend URL.
pub const ENV_BACKEND_URL: &str = "ONRAMP_BACKEND_URL";

/// Environment variable overriding the backend public key.
pub const ENV_BACKEND_ANON_KEY: &str = "ONRAMP_BACKEND_ANON_KEY";

/// Backend URL used when nothing else is configured (local development stack).
pub const DEFAULT_URL: &str = "http://127.0.0.1:54321";

/// Public key used when nothing else is configured.
pub const DEFAULT_ANON_KEY: &str = "onramp-local-anon-key";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the auth and table services live and how to call them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted backend
    pub url: String,

    /// Public (anonymous) API key
    pub anon_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            anon_key: DEFAULT_ANON_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Creates a config for the given endpoint and key.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            ..Default::default()
        }
    }

    /// Applies explicit overrides; `None` and blank values keep the current value.
    pub fn with_overrides(mut self, url: Option<String>, anon_key: Option<String>) -> Self {
        if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
            self.url = url;
        }
        if let Some(key) = anon_key.filter(|v| !v.trim().is_empty()) {
            self.anon_key = key;
        }
        self
    }

    /// Applies [`ENV_BACKEND_URL`] and [`ENV_BACKEND_ANON_KEY`] if set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_BACKEND_URL).ok(),
            std::env::var(ENV_BACKEND_ANON_KEY).ok(),
        )
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that the config can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(Error::config(format!(
                "backend url must start with http:// or https://, got '{}'",
                self.url
            )));
        }
        if self.anon_key.trim().is_empty() {
            return Err(Error::config("backend anon key must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
