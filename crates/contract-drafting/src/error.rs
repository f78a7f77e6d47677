//! Error types for drafting

use thiserror::Error;

/// Errors that can occur while drafting a contract
#[derive(Error, Debug)]
pub enum DraftingError {
    /// Clause library is not valid YAML/JSON
    #[error("Failed to parse clause library: {0}")]
    Parse(String),

    /// Clause library parsed but is not a mapping of strings to strings
    #[error("Malformed clause library: {0}")]
    MalformedLibrary(String),

    /// Template missing or failed to render
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
