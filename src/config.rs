use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HomescoutError, Result};

/// Global homescout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search region hint passed to the provider (e.g., "in-en")
    #[serde(default = "default_region")]
    pub region: String,

    /// Maximum search results to request per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// How many of the top search results to run through extraction
    #[serde(default = "default_analyze_limit")]
    pub analyze_limit: usize,

    /// How many ranked properties to recommend
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Gemini model used for extraction and summaries
    #[serde(default = "default_model")]
    pub model: String,

    /// API key fallback; the GEMINI_API_KEY env var takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Retry behavior for rate-limited model calls
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Retry behavior for transient model failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each subsequent retry
    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,
}

fn default_region() -> String {
    "in-en".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_analyze_limit() -> usize {
    3
}

fn default_top_k() -> usize {
    3
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            max_results: default_max_results(),
            analyze_limit: default_analyze_limit(),
            top_k: default_top_k(),
            model: default_model(),
            api_key: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_secs: default_initial_delay(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| HomescoutError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports HOMESCOUT_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("HOMESCOUT_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "homescout")
            .ok_or_else(|| HomescoutError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the Gemini API key: env var first, then the config file
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
        self.api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .ok_or(HomescoutError::MissingApiKey)
    }
}
