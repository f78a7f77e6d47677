//! Configuration file parsing for the server.
//!
//! Loads the bind address, resources directory, LLM deadline and upload
//! limit from TOML files.

use contract_extractor::ExtractorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but out of range
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// Directory holding `policies.yaml`, `clauses.yaml` and `templates/`
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// Deadline for the whole LLM round trip (default: 90)
    #[serde(default = "default_llm_timeout")]
    pub llm_timeout_secs: u64,

    /// Maximum request body size in bytes (default: 20 MiB)
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_llm_timeout() -> u64 {
    90
}

/// Default upload limit: 20 MiB
fn default_max_upload() -> usize {
    20 * 1024 * 1024
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "llm_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Create the default configuration
    pub fn default_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            resources_dir: default_resources_dir(),
            llm_timeout_secs: default_llm_timeout(),
            max_upload_bytes: default_max_upload(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Path of the default policy file
    pub fn policies_path(&self) -> PathBuf {
        self.resources_dir.join("policies.yaml")
    }

    /// Extractor settings derived from this configuration
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            llm_timeout_secs: self.llm_timeout_secs,
            ..ExtractorConfig::default()
        }
    }
}
