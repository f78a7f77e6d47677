//! Review error types

use thiserror::Error;

/// Errors that can occur while loading review inputs
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Policy file could not be read
    #[error("Failed to read policy file: {0}")]
    Read(#[from] std::io::Error),

    /// Policy file is not a valid policy list
    #[error("Failed to parse policies: {0}")]
    Parse(String),
}
