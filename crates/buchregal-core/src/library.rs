//! Library operations
//!
//! The service wraps a record store with the flows the UI triggers: add
//! a read book or a wish, mark wishes as read, edit cells, search the
//! collection and answer author statistics. Mutations that can introduce
//! a new author spelling re-run the canonicalization pass inline.

use std::time::Duration;

use buchregal_domain::{parse_quick_entry, Book, ReadStatus};

use crate::canonical::pass::{canonicalize_authors_paced, confirmed_authors, CleanupReport};
use crate::config::LibraryConfig;
use crate::error::{LibraryError, Result};
use crate::sources::BookMeta;
use crate::store::{Field, RecordStore};
use crate::suggest::suggest_author;

pub struct LibraryService<S: RecordStore> {
    store: S,
    config: LibraryConfig,
}

impl<S: RecordStore> LibraryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LibraryConfig::default())
    }

    pub fn with_config(store: S, config: LibraryConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Add a book that was just read.
    ///
    /// `entry` is the quick-entry line (`"Titel, Autor"`). The typed
    /// author is resolved against the confirmed authors before it is
    /// stored, then the cleanup pass runs.
    pub fn add_book(
        &mut self,
        entry: &str,
        rating: Option<u8>,
        note: &str,
        meta: BookMeta,
    ) -> Result<Book> {
        let (title, typed_author) = parse_quick_entry(entry)
            .ok_or_else(|| LibraryError::InvalidEntry(entry.to_string()))?;

        let known = confirmed_authors(&self.store.read_all()?);
        let author = suggest_author(&typed_author, &known);

        let mut book = Book::new(title, author)
            .with_note(note)
            .with_added_on(chrono::Local::now().date_naive());
        if let Some(rating) = rating {
            book = book.with_rating(rating);
        }
        book = self.apply_meta(book, meta);

        self.store.append(&book)?;
        self.cleanup();
        Ok(book)
    }

    /// Add a book to the wishlist. The author is stored as typed; it
    /// joins the directory once the book is marked as read.
    pub fn add_wish(&mut self, entry: &str, note: &str, meta: BookMeta) -> Result<Book> {
        let (title, author) = parse_quick_entry(entry)
            .ok_or_else(|| LibraryError::InvalidEntry(entry.to_string()))?;

        let mut book = Book::new(title, author)
            .with_status(ReadStatus::Wishlist)
            .with_note(note)
            .with_added_on(chrono::Local::now().date_naive());
        book = self.apply_meta(book, meta);

        self.store.append(&book)?;
        self.cleanup();
        Ok(book)
    }

    fn apply_meta(&self, mut book: Book, meta: BookMeta) -> Book {
        if let Some(cover) = meta.cover_url {
            book = book.with_cover(cover);
        }
        if let Some(genre) = meta.genre {
            book = book.with_genre(genre);
        }
        book
    }

    /// Move a wish into the collection: set the status and refresh the
    /// added date, then let the pass pick up the now-confirmed author.
    pub fn mark_as_read(&mut self, title: &str) -> Result<()> {
        self.store
            .update_field(title, Field::Status, ReadStatus::Read.as_sheet_value())?;
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
        self.store.update_field(title, Field::Added, &today)?;
        self.cleanup();
        Ok(())
    }

    pub fn update_note(&mut self, title: &str, note: &str) -> Result<()> {
        self.store.update_field(title, Field::Note, note)?;
        Ok(())
    }

    pub fn update_rating(&mut self, title: &str, rating: u8) -> Result<()> {
        self.store
            .update_field(title, Field::Rating, &rating.to_string())?;
        Ok(())
    }

    /// Overwrite an author cell; an edit can introduce a new spelling,
    /// so the pass runs afterwards.
    pub fn update_author(&mut self, title: &str, author: &str) -> Result<()> {
        self.store.update_field(title, Field::Author, author)?;
        self.cleanup();
        Ok(())
    }

    pub fn delete_book(&mut self, title: &str) -> Result<()> {
        self.store.delete(title)?;
        Ok(())
    }

    /// Case-insensitive filter across title, author and note of the
    /// read collection.
    pub fn search(&self, query: &str) -> Result<Vec<Book>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .store
            .read_all()?
            .into_iter()
            .filter(|b| !b.status.is_wishlist())
            .filter(|b| {
                needle.is_empty()
                    || b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
                    || b.note.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn wishlist(&self) -> Result<Vec<Book>> {
        Ok(self
            .store
            .read_all()?
            .into_iter()
            .filter(|b| b.status.is_wishlist())
            .collect())
    }

    /// Distinct authors with at least one read book, sorted.
    pub fn confirmed_authors(&self) -> Result<Vec<String>> {
        Ok(confirmed_authors(&self.store.read_all()?))
    }

    /// Books per author over the read collection, most-read first.
    pub fn author_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();
        for book in self.store.read_all()? {
            if !book.status.is_wishlist() && !book.author.trim().is_empty() {
                *counts.entry(book.author.trim().to_string()).or_default() += 1;
            }
        }
        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }

    /// Run the canonicalization pass on demand.
    pub fn cleanup(&mut self) -> CleanupReport {
        let delay = Duration::from_millis(self.config.sheet.write_delay_ms);
        canonicalize_authors_paced(&mut self.store, delay)
    }
}
