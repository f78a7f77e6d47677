//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (contract-llm)
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Generate output constrained to the given JSON schema (if supported)
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str;
}
