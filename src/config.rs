//! Configuration System
//!
//! Optional `merklewatch.toml` at the snapshot root (or an explicit
//! `--config` path) carrying scan policy, ignore-file name, and logging
//! settings. CLI flags override the file; the file overrides defaults.

use crate::error::ConfigError;
use crate::ignore::DEFAULT_IGNORE_FILE;
use crate::logging::LoggingConfig;
use crate::tree::scanner::ScanConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file name looked up at the snapshot root.
pub const CONFIG_FILE: &str = "merklewatch.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Scan behavior (unreadable-file policy)
    #[serde(default)]
    pub scan: ScanConfig,

    /// Ignore-file settings
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ignore-file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Name of the ignore file at the snapshot root
    #[serde(default = "default_ignore_file")]
    pub file_name: String,
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_ignore_file(),
        }
    }
}

/// Loads configuration from a file or falls back to defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `merklewatch.toml` from `root` if present, defaults otherwise.
    pub fn load(root: &Path) -> Result<WatchConfig, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(WatchConfig::default());
        }
        Self::load_from_file(&path)
    }

    /// Load configuration from an explicit path; the file must exist.
    pub fn load_from_file(path: &Path) -> Result<WatchConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError(format!("Failed to parse {}: {}", path.display(), e)))
    }
}
