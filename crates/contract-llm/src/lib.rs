//! Contract AI LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `contract-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! Providers are capability-checked at construction: `GeminiProvider::from_env`
//! returns `LlmError::NotConfigured` when no API key is available, so callers
//! decide once, up front, whether an LLM path exists at all.
//!
//! # Examples
//!
//! ```
//! use contract_llm::MockProvider;
//! use contract_domain::traits::LlmProvider;
//!
//! # tokio_test_block(async {
//! let provider = MockProvider::new("{}");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "{}");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod log;
pub mod settings;

use contract_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use log::LlmLog;
pub use settings::LlmSettings;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Provider missing credentials or otherwise unusable
    #[error("LLM not configured: {0}")]
    NotConfigured(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Request did not complete in time
    #[error("LLM request timed out")]
    Timeout,
}

/// Mock LLM provider for deterministic testing
///
/// Answers every prompt with the same canned text (or the same failure)
/// and counts calls, so tests can assert whether the LLM path ran.
///
/// # Examples
///
/// ```
/// use contract_llm::MockProvider;
///
/// let provider = MockProvider::new(r#"{"title": "MSA"}"#);
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: Result<String, String>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a MockProvider answering every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            reply: Ok(response.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockProvider that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of generate calls so far, shared between clones
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(LlmError::Communication)
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        self.respond()
    }

    async fn generate_structured(&self, _prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.respond()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
