//! CLI configuration.

use std::path::PathBuf;

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the persisted catalog documents
    pub data_dir: PathBuf,
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("VIDSMART_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
        }
    }
}

/// Default data directory: `~/.vidsmart`, or the working directory without a
/// resolvable home.
fn default_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".vidsmart");
    }
    PathBuf::from(".vidsmart")
}
