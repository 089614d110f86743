//! Open Library source plugin, the cover fallback
//!
//! API docs: https://openlibrary.org/dev/docs/api/search
//! Covers are addressed by the numeric `cover_i` of the first search hit.

use serde::Deserialize;

use super::{SourceError, SourceMetadata};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Option<Vec<Doc>>,
}

#[derive(Debug, Deserialize)]
struct Doc {
    cover_i: Option<i64>,
}

pub struct OpenLibrarySource;

impl OpenLibrarySource {
    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "openlibrary",
            name: "Open Library",
            base_url: "https://openlibrary.org",
            rate_limit_per_second: 1.0,
            requires_api_key: false,
        }
    }

    pub fn search_url(title: &str, author: &str) -> String {
        let query = format!("{} {}", title, author);
        format!(
            "{}/search.json?q={}&limit=1",
            Self::metadata().base_url,
            urlencoding::encode(query.trim())
        )
    }

    /// Parse a search response into a medium-size cover URL, if any hit
    /// carries a cover id.
    pub fn parse_search_response(json: &str) -> Result<Option<String>, SourceError> {
        let response: SearchResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Open Library JSON: {}", e)))?;

        Ok(response
            .docs
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|doc| doc.cover_i)
            .map(Self::cover_url))
    }

    /// Format the cover image URL for a cover id.
    pub fn cover_url(cover_id: i64) -> String {
        format!("https://covers.openlibrary.org/b/id/{}-M.jpg", cover_id)
    }
}
