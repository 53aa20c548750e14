use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::discovery::lister::RepositoryLayout;

/// Timeout for a single HTTP request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every HTTP request
pub const DEFAULT_USER_AGENT: &str = concat!("version-discovery/", env!("CARGO_PKG_VERSION"));

/// Top-level configuration file structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryConfig {
    pub http: HttpConfig,
    pub repositories: Vec<RepositoryConfig>,
}

impl DiscoveryConfig {
    /// Reads a JSON configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub user_agent: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

/// A single repository to discover versions in
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryConfig {
    pub name: String,
    /// Repository root, an `http(s)://` URL or a local path
    pub url: String,
    pub layout: RepositoryLayout,
    /// Artifact patterns relative to `url`; Maven repositories fall back to
    /// the standard Maven 2 pattern when empty
    pub artifact_patterns: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            layout: RepositoryLayout::Maven,
            artifact_patterns: Vec::new(),
        }
    }
}

/// Returns the path to the data directory for version-discovery.
/// Uses $XDG_DATA_HOME/version-discovery if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-discovery,
/// or ./version-discovery if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default configuration file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the directory log files are written to.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-discovery")
}
