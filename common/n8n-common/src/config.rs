//! Configuration loading
//!
//! Settings resolve with priority: CLI flag > environment > `.n8n.toml` > defaults.
//! Flag and environment handling is done by clap (`env = "N8N_API_URL"` etc.);
//! this module supplies the file layer and the final merge.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// Base URL used when nothing else is configured
pub const DEFAULT_URL: &str = "http://localhost:5678";

const CONFIG_FILE: &str = ".n8n.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. `N8N_CONFIG_PATH` when set
/// 2. Current directory and parent directories (walking up to root)
/// 3. Global config at ~/.config/n8n-tools/
fn find_config_file(filename: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var("N8N_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("n8n-tools").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

/// Top-level file configuration (from .n8n.toml)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    pub url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// Load config from .n8n.toml, falling back to defaults when none exists
    pub fn load() -> Result<Self> {
        if let Some(config_path) = find_config_file(CONFIG_FILE) {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

/// Fully resolved client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Merge flag/env values over the file config
    ///
    /// Fails with [`ApiError::Config`] when no non-empty API key is found.
    pub fn resolve(
        url: Option<String>,
        api_key: Option<String>,
        file: &FileConfig,
    ) -> ApiResult<Self> {
        let base_url = url
            .filter(|u| !u.is_empty())
            .or_else(|| file.server.url.clone())
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| file.server.api_key.clone().filter(|k| !k.is_empty()))
            .ok_or_else(ApiError::missing_api_key)?;

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(file.server.timeout_secs),
        })
    }
}
