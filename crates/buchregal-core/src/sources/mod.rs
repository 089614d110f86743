//! Metadata source plugins
//!
//! Cover images and genre hints come from public book APIs. Each source
//! is a pure response parser plus URL builder; [`lookup::CoverLookup`]
//! owns the HTTP side and the fallback order.

pub mod google_books;
pub mod lookup;
pub mod open_library;

pub use google_books::{GoogleBooksSource, VolumeMeta};
pub use lookup::{BookMeta, CoverLookup};
pub use open_library::OpenLibrarySource;

use crate::http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(HttpError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Rate limited")]
    RateLimit,
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited => SourceError::RateLimit,
            other => SourceError::Http(other),
        }
    }
}

/// Metadata about a source
pub struct SourceMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub base_url: &'static str,
    pub rate_limit_per_second: f32,
    pub requires_api_key: bool,
}
