//! Record store abstraction
//!
//! The production backend is a remote spreadsheet addressed by title; the
//! trait models exactly the row operations the library needs so tests can
//! run against [`MemoryStore`].

pub mod memory;

pub use memory::MemoryStore;

use buchregal_domain::Book;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No row's title cell matches exactly.
    #[error("No row with title: {title}")]
    TitleNotFound { title: String },
    /// Transient backend failure (network, quota, malformed sheet).
    #[error("Backend error: {message}")]
    Backend { message: String },
    #[error("Rate limited")]
    RateLimited,
}

/// A writable cell column of the book sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    Genre,
    Rating,
    Cover,
    Added,
    Note,
    Status,
}

impl Field {
    /// The sheet's header label for this column.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Author => "Autor",
            Field::Genre => "Genre",
            Field::Rating => "Bewertung",
            Field::Cover => "Cover",
            Field::Added => "Hinzugefügt",
            Field::Note => "Notiz",
            Field::Status => "Status",
        }
    }
}

/// Row-oriented access to the book list and the author directory.
///
/// Rows are located by exact title match, mirroring the remote `find`
/// call. Every method is a separate remote operation with no batching or
/// transaction guarantee; callers own partial-failure handling.
pub trait RecordStore: Send {
    /// Read every record, skipping rows without a title.
    fn read_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Overwrite a single cell of the row whose title matches exactly.
    fn update_field(&mut self, title: &str, field: Field, value: &str)
        -> Result<(), StoreError>;

    /// Append a new row.
    fn append(&mut self, book: &Book) -> Result<(), StoreError>;

    /// Delete the row whose title matches exactly.
    fn delete(&mut self, title: &str) -> Result<(), StoreError>;

    /// Clear the author directory and rewrite it with the given names.
    fn replace_directory(&mut self, names: &[String]) -> Result<(), StoreError>;
}
