//! Common test utilities for the CLI integration tests.

use std::path::PathBuf;

use onramp_cli::cli::BackendArgs;
use tempfile::TempDir;

/// A config file in a temporary directory.
pub struct ConfigFixture {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// Path of the config file
    pub path: PathBuf,
}

impl ConfigFixture {
    /// Writes `content` to `<tmp>/onramp/config.toml`.
    pub fn with_content(content: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("onramp").join("config.toml");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("config dir");
        std::fs::write(&path, content).expect("config file");
        Self { dir, path }
    }

    /// Path as the `--config` flag would carry it.
    pub fn arg(&self) -> Option<&str> {
        self.path.to_str()
    }
}

/// Backend flags for in-memory runs.
pub fn offline() -> BackendArgs {
    BackendArgs {
        offline: true,
        ..Default::default()
    }
}
