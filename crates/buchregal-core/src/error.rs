//! Error types for buchregal-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::sources::SourceError;
use crate::store::StoreError;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Main error type for library operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Metadata source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Blurb generation errors
    #[error("LLM error: {0}")]
    Llm(#[from] buchregal_llm::LlmError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed quick entry input
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}
