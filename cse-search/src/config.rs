//! Configuration loading for cse-search
//!
//! Configuration is loaded from:
//! 1. Environment variable CSE_SEARCH_CONFIG_PATH
//! 2. ~/.cse-search/config.toml
//! 3. Default values
//!
//! `GOOGLE_CSE_API_KEY` and `GOOGLE_CSE_ENGINE_ID` override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::{EngineKind, SafeLevel};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default search options
    #[serde(default)]
    pub search: SearchOptions,
    /// HTTP transport configuration
    #[serde(default)]
    pub transport: TransportConfig,
    /// Per-scope (e.g. per-channel) overrides, keyed by scope name
    #[serde(default)]
    pub scopes: BTreeMap<String, ScopeOverrides>,
}

/// The options bundle a search session starts from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// API key for the Custom Search API
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Custom search engine id (`cx`)
    #[serde(default)]
    pub engine_id: Option<String>,
    /// Results requested per page
    #[serde(default = "default_max_page_results")]
    pub max_page_results: u32,
    /// Maximum pages fetched per search (0 = unlimited)
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Maximum results shown per page
    #[serde(default = "default_max_display_results")]
    pub max_display_results: usize,
    /// Show result snippets
    #[serde(default)]
    pub include_snippet: bool,
    #[serde(default)]
    pub safe_level: SafeLevel,
    #[serde(default)]
    pub engine: EngineKind,
}

/// Partial options for one scope; unset keys fall back to `[search]`
///
/// The API key is global only and cannot be overridden per scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeOverrides {
    pub engine_id: Option<String>,
    pub max_page_results: Option<u32>,
    pub max_pages: Option<u32>,
    pub max_display_results: Option<usize>,
    pub include_snippet: Option<bool>,
    pub safe_level: Option<SafeLevel>,
    pub engine: Option<EngineKind>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// Default value functions
fn default_max_page_results() -> u32 {
    10
}

fn default_max_pages() -> u32 {
    1
}

fn default_max_display_results() -> usize {
    5
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("cse-search/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            max_page_results: default_max_page_results(),
            max_pages: default_max_pages(),
            max_display_results: default_max_display_results(),
            include_snippet: false,
            safe_level: SafeLevel::default(),
            engine: EngineKind::default(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ScopeOverrides {
    fn apply(&self, options: &mut SearchOptions) {
        if let Some(engine_id) = &self.engine_id {
            options.engine_id = Some(engine_id.clone());
        }
        if let Some(v) = self.max_page_results {
            options.max_page_results = v;
        }
        if let Some(v) = self.max_pages {
            options.max_pages = v;
        }
        if let Some(v) = self.max_display_results {
            options.max_display_results = v;
        }
        if let Some(v) = self.include_snippet {
            options.include_snippet = v;
        }
        if let Some(v) = self.safe_level {
            options.safe_level = v;
        }
        if let Some(v) = self.engine {
            options.engine = v;
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(Self::find_config_path())
    }

    /// Load from an explicit path (if any), then apply environment overrides
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = config_path {
            if path.exists() {
                Self::from_path(&path)?
            } else {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
        } else {
            tracing::info!("No config path specified, using defaults");
            Self::default()
        };

        // Credentials from environment (highest priority)
        if let Ok(key) = std::env::var("GOOGLE_CSE_API_KEY") {
            config.search.api_key = Some(key);
        }
        if let Ok(id) = std::env::var("GOOGLE_CSE_ENGINE_ID") {
            config.search.engine_id = Some(id);
        }

        Ok(config)
    }

    /// Load a file the user named explicitly; a missing file is an error
    pub fn load_explicit(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("config file {} not found", path.display());
        }
        Self::load_from(Some(path.to_path_buf()))
    }

    /// Parse a TOML configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Effective options for a scope, or the global defaults for `None`
    pub fn options_for(&self, scope: Option<&str>) -> SearchOptions {
        let mut options = self.search.clone();
        if let Some(overrides) = scope.and_then(|name| self.scopes.get(name)) {
            overrides.apply(&mut options);
        }
        options
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("CSE_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.cse-search/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".cse-search").join("config.toml");
            return Some(path);
        }

        None
    }
}
