//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables (including a `.env` file)
//! - Command-line arguments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wordwise_core::http::DEFAULT_BASE_URL;
use wordwise_core::{DictionaryConfig, RetryPolicy};

/// Environment variable holding the dictionary API key
pub const API_KEY_ENV: &str = "WORDWISE_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream dictionary settings
    pub upstream: UpstreamConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Saved-word storage
    pub storage: StorageConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Upstream dictionary configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API key sent with every lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Collegiate endpoint the word is appended to
    pub base_url: String,

    /// Timeout in seconds
    pub timeout_secs: u64,

    /// Retries after the first attempt
    pub max_retries: u32,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,

    /// Directory served for every path outside the API
    pub static_dir: PathBuf,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub saved_words_file: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_retries: 3,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            static_dir: PathBuf::from("."),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            saved_words_file: PathBuf::from("saved_words.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file, picking the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match extension(path) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading configuration file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wordwise").join("config.toml"))
    }

    /// Configuration file paths checked in order
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("wordwise.toml"),
            PathBuf::from("wordwise.yaml"),
            PathBuf::from("wordwise.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let wordwise_dir = config_dir.join("wordwise");
            paths.push(wordwise_dir.join("config.toml"));
            paths.push(wordwise_dir.join("config.yaml"));
            paths.push(wordwise_dir.join("config.json"));
        }

        paths
    }

    /// Apply `WORDWISE_*` environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.upstream.api_key = Some(key);
        }
        if let Some(base_url) = lookup("WORDWISE_BASE_URL") {
            self.upstream.base_url = base_url;
        }
        if let Some(port) = lookup("WORDWISE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("WORDWISE_PORT is not a valid port: {}", port)))?;
        }
        if let Some(path) = lookup("WORDWISE_SAVED_WORDS") {
            self.storage.saved_words_file = PathBuf::from(path);
        }
        Ok(())
    }

    /// Build the upstream client configuration; a key passed on the
    /// command line wins over configured ones
    pub fn dictionary_config(&self, api_key: Option<&str>) -> Result<DictionaryConfig> {
        let key = api_key
            .map(str::to_string)
            .or_else(|| self.upstream.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::ApiKeyMissing)?;

        Ok(DictionaryConfig::new(key)
            .with_base_url(self.upstream.base_url.clone())
            .with_timeout(self.upstream.timeout_secs)
            .with_retry_policy(RetryPolicy::new(self.upstream.max_retries)))
    }

    /// Serialize in the format matching the file extension
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        Ok(match extension(path) {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}
