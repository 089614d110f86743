//! Google Books source plugin for covers and categories
//!
//! API docs: https://developers.google.com/books/docs/v1/using
//! No key needed for volume search at personal-library request rates.

use serde::Deserialize;

use super::{SourceError, SourceMetadata};

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    categories: Option<Vec<String>>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
    #[serde(rename = "smallThumbnail")]
    small_thumbnail: Option<String>,
}

/// Cover and category hints for one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMeta {
    pub title: Option<String>,
    pub cover_url: Option<String>,
    pub category: Option<String>,
}

pub struct GoogleBooksSource;

impl GoogleBooksSource {
    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "googlebooks",
            name: "Google Books",
            base_url: "https://www.googleapis.com/books/v1",
            rate_limit_per_second: 1.0,
            requires_api_key: false,
        }
    }

    /// Build the volume search URL for a title/author pair.
    pub fn search_url(title: &str, author: &str) -> String {
        let query = format!("{} {}", title, author);
        format!(
            "{}/volumes?q={}&maxResults=1",
            Self::metadata().base_url,
            urlencoding::encode(query.trim())
        )
    }

    /// Parse a volume search response; `None` when the search came up empty.
    pub fn parse_search_response(json: &str) -> Result<Option<VolumeMeta>, SourceError> {
        let response: VolumesResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Google Books JSON: {}", e)))?;

        let Some(volume) = response.items.unwrap_or_default().into_iter().next() else {
            return Ok(None);
        };
        let info = volume.volume_info;

        let cover_url = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));
        let category = info
            .categories
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Some(VolumeMeta {
            title: info.title,
            cover_url,
            category,
        }))
    }
}
