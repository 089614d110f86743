//! Book record representation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::ReadStatus;

/// A single library record, one row in the backing store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Author as free text, exactly as typed or as canonicalized later.
    pub author: String,
    pub genre: String,
    /// Star rating 1-5; absent for unrated and wishlist entries.
    pub rating: Option<u8>,
    pub cover_url: Option<String>,
    pub added_on: Option<NaiveDate>,
    pub note: String,
    pub status: ReadStatus,
}

impl Book {
    /// Create a new record with just a title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            genre: String::new(),
            rating: None,
            cover_url: None,
            added_on: None,
            note: String::new(),
            status: ReadStatus::Read,
        }
    }

    /// Builder method to set the genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Builder method to set the rating; values outside 1-5 are dropped
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = parse_rating(&rating.to_string());
        self
    }

    /// Builder method to set the cover URL
    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    /// Builder method to set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Builder method to set the status
    pub fn with_status(mut self, status: ReadStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the added date
    pub fn with_added_on(mut self, date: NaiveDate) -> Self {
        self.added_on = Some(date);
        self
    }

    /// The cover cell value; the sheet uses `-` for "no cover".
    pub fn cover_cell(&self) -> &str {
        self.cover_url.as_deref().unwrap_or("-")
    }
}

/// Parse a rating cell. Non-numeric or out-of-range text counts as unrated.
pub fn parse_rating(cell: &str) -> Option<u8> {
    let value: u8 = cell.trim().parse().ok()?;
    (1..=5).contains(&value).then_some(value)
}

/// Parse a date cell in the sheet's `YYYY-MM-DD` format.
pub fn parse_added_on(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let book = Book::new("Uprooted", "Naomi Novik");
        assert_eq!(book.title, "Uprooted");
        assert_eq!(book.author, "Naomi Novik");
        assert_eq!(book.status, ReadStatus::Read);
        assert!(book.rating.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let book = Book::new("Uprooted", "Naomi Novik")
            .with_genre("Fantasy")
            .with_rating(5)
            .with_status(ReadStatus::Wishlist)
            .with_note("Empfehlung von Anna");
        assert_eq!(book.genre, "Fantasy");
        assert_eq!(book.rating, Some(5));
        assert!(book.status.is_wishlist());
        assert_eq!(book.note, "Empfehlung von Anna");
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("4"), Some(4));
        assert_eq!(parse_rating(" 5 "), Some(5));
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("6"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("fünf"), None);
    }

    #[test]
    fn test_parse_added_on() {
        assert_eq!(
            parse_added_on("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_added_on("01.03.2024"), None);
    }

    #[test]
    fn test_cover_cell_placeholder() {
        let book = Book::new("Uprooted", "Naomi Novik");
        assert_eq!(book.cover_cell(), "-");
        let with_cover = book.with_cover("https://covers.openlibrary.org/b/id/1-M.jpg");
        assert_eq!(
            with_cover.cover_cell(),
            "https://covers.openlibrary.org/b/id/1-M.jpg"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let book = Book::new("Uprooted", "Naomi Novik").with_rating(4);
        let json = serde_json::to_string(&book).unwrap();
        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, parsed);
    }
}
