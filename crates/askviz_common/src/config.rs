//! Backend endpoint configuration.
//!
//! Resolution order: built-in defaults, then the user config file
//! (`~/.config/askviz/config.toml`), then environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default backend for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the analytics backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the analytics backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Path of the user config file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("askviz").join("config.toml"))
    }

    /// Load configuration: defaults, then the config file, then the environment
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply `ASKVIZ_BASE_URL` and `ASKVIZ_TIMEOUT_SECS` overrides
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ASKVIZ_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(secs) = std::env::var("ASKVIZ_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.timeout_secs = secs;
            }
        }
    }
}
