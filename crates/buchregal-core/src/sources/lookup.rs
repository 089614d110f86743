//! Cover and genre lookup orchestration
//!
//! Google Books answers first; Open Library fills in covers it misses.
//! The whole lookup is best-effort: a book without metadata is still a
//! book, so failures degrade to empty fields instead of propagating.

use tracing::debug;

use crate::genre::shelf_genre;
use crate::http::HttpClient;

use super::google_books::{GoogleBooksSource, VolumeMeta};
use super::open_library::OpenLibrarySource;
use super::SourceError;

/// What a lookup produced for one title/author pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMeta {
    pub cover_url: Option<String>,
    /// Shelf genre, already mapped to the library's vocabulary.
    pub genre: Option<String>,
}

pub struct CoverLookup {
    http: HttpClient,
}

impl CoverLookup {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch cover and genre hints for a book. Never fails; sources that
    /// error or return nothing leave the cover empty and the genre at
    /// the shelf default.
    pub async fn fetch(&self, title: &str, author: &str) -> BookMeta {
        let mut meta = BookMeta::default();

        match self.google_books(title, author).await {
            Ok(Some(volume)) => {
                meta.cover_url = volume.cover_url;
                meta.genre = Some(shelf_genre(volume.category.as_deref()));
            }
            Ok(None) => {}
            Err(error) => debug!(%error, title, "google books lookup failed"),
        }

        if meta.cover_url.is_none() {
            match self.open_library(title, author).await {
                Ok(cover) => meta.cover_url = cover,
                Err(error) => debug!(%error, title, "open library lookup failed"),
            }
        }

        meta.genre.get_or_insert_with(|| shelf_genre(None));
        meta
    }

    async fn google_books(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<VolumeMeta>, SourceError> {
        let url = GoogleBooksSource::search_url(title, author);
        let response = self.http.get(&url).await?;
        GoogleBooksSource::parse_search_response(&response.body)
    }

    async fn open_library(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<String>, SourceError> {
        let url = OpenLibrarySource::search_url(title, author);
        let response = self.http.get(&url).await?;
        OpenLibrarySource::parse_search_response(&response.body)
    }
}

impl Default for CoverLookup {
    fn default() -> Self {
        Self::new(HttpClient::default())
    }
}
