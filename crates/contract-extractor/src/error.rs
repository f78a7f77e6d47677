//! Error types for the Extractor

use contract_review::ReviewError;
use thiserror::Error;

/// Errors that can occur while turning a file into text
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Input path does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// I/O or decoding failure
    #[error("Failed to read document: {0}")]
    Read(String),

    /// File type cannot be turned into text
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Support for the file type was not compiled in
    #[error("Missing dependency: {0}")]
    MissingDependency(String),
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        LoaderError::Read(e.to_string())
    }
}

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document loading error
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Policy file error
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Text exceeds maximum length
    #[error("Text too long: {0} bytes (max: {1})")]
    TextTooLong(usize, usize),

    /// LLM response is not usable JSON
    #[error("Invalid LLM response format: {0}")]
    InvalidFormat(String),

    /// LLM response has the wrong shape or values
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Blocking task failed to complete
    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
