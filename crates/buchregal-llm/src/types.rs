//! Type definitions for blurb generation

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Text content of the message
    pub content: String,
}

/// What to write a blurb about
#[derive(Debug, Clone)]
pub struct BlurbRequest {
    pub title: String,
    pub author: String,
    /// Shelf genre, when known
    pub genre: Option<String>,
    /// Output language, e.g. "Deutsch"
    pub language: String,
}

impl BlurbRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: None,
            language: "Deutsch".to_string(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

/// A generated blurb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlurbResponse {
    /// One-paragraph description
    pub blurb: String,
    /// Optional theme keywords
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Error types for blurb operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Missing API key: {env_var}")]
    MissingApiKey { env_var: String },
}
