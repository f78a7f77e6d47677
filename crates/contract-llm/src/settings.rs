//! LLM settings read from the environment
//!
//! Recognised variables:
//!
//! - `GEMINI_API_KEY`: enables the Gemini provider
//! - `GEMINI_MODEL`: overrides the model name
//! - `LLM_LOG` / `CONTRACT_AI_LLM_LOG`: enable prompt/response file logging
//! - `LLM_LOG_FILE`: log path override

use std::path::PathBuf;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Default Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default prompt/response log file
pub const DEFAULT_LOG_FILE: &str = "llm.log";

/// Settings for constructing an LLM provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    /// API key; the provider is unavailable without one
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// REST endpoint base URL
    pub endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Where to append prompts and responses, when logging is enabled
    pub log_file: Option<PathBuf>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

impl LlmSettings {
    /// Read settings from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_enabled = ["LLM_LOG", "CONTRACT_AI_LLM_LOG"]
            .iter()
            .any(|key| non_empty(key).is_some_and(|v| is_truthy(&v)));

        let log_file = log_enabled.then(|| {
            non_empty("LLM_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
        });

        Self {
            api_key: non_empty("GEMINI_API_KEY"),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file,
        }
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Override the REST endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
