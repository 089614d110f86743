//! In-memory record store
//!
//! Backs tests and offline use. Behaves like the remote sheet: titles are
//! matched exactly, the directory is replaced wholesale.

use buchregal_domain::{parse_rating, Book, ReadStatus};

use super::{Field, RecordStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    books: Vec<Book>,
    directory: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with records.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books,
            directory: Vec::new(),
        }
    }

    /// The current author directory.
    pub fn directory(&self) -> &[String] {
        &self.directory
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, title: &str) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|b| b.title == title)
            .ok_or_else(|| StoreError::TitleNotFound {
                title: title.to_string(),
            })
    }
}

impl RecordStore for MemoryStore {
    fn read_all(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self
            .books
            .iter()
            .filter(|b| !b.title.trim().is_empty())
            .cloned()
            .collect())
    }

    fn update_field(
        &mut self,
        title: &str,
        field: Field,
        value: &str,
    ) -> Result<(), StoreError> {
        let idx = self.position(title)?;
        let book = &mut self.books[idx];
        match field {
            Field::Author => book.author = value.to_string(),
            Field::Genre => book.genre = value.to_string(),
            Field::Rating => book.rating = parse_rating(value),
            Field::Cover => {
                book.cover_url = match value.trim() {
                    "" | "-" => None,
                    url => Some(url.to_string()),
                }
            }
            Field::Added => book.added_on = buchregal_domain::book::parse_added_on(value),
            Field::Note => book.note = value.to_string(),
            Field::Status => book.status = ReadStatus::from_sheet_value(value),
        }
        Ok(())
    }

    fn append(&mut self, book: &Book) -> Result<(), StoreError> {
        self.books.push(book.clone());
        Ok(())
    }

    fn delete(&mut self, title: &str) -> Result<(), StoreError> {
        let idx = self.position(title)?;
        self.books.remove(idx);
        Ok(())
    }

    fn replace_directory(&mut self, names: &[String]) -> Result<(), StoreError> {
        self.directory = names.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryStore {
        MemoryStore::with_books(vec![
            Book::new("Uprooted", "Naomi Novik").with_rating(5),
            Book::new("Der Distelfink", "Donna Tartt"),
        ])
    }

    #[test]
    fn test_read_all_skips_untitled_rows() {
        let mut store = sample();
        store.append(&Book::new("", "Ghost")).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_author_cell() {
        let mut store = sample();
        store
            .update_field("Uprooted", Field::Author, "N. Novik")
            .unwrap();
        let books = store.read_all().unwrap();
        assert_eq!(books[0].author, "N. Novik");
    }

    #[test]
    fn test_update_unknown_title() {
        let mut store = sample();
        let err = store
            .update_field("Nicht da", Field::Note, "x")
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::TitleNotFound {
                title: "Nicht da".to_string()
            }
        );
    }

    #[test]
    fn test_rating_cell_parsing() {
        let mut store = sample();
        store
            .update_field("Der Distelfink", Field::Rating, "3")
            .unwrap();
        assert_eq!(store.read_all().unwrap()[1].rating, Some(3));
        store
            .update_field("Der Distelfink", Field::Rating, "nope")
            .unwrap();
        assert_eq!(store.read_all().unwrap()[1].rating, None);
    }

    #[test]
    fn test_cover_placeholder_clears() {
        let mut store = sample();
        store
            .update_field("Uprooted", Field::Cover, "https://example.org/c.jpg")
            .unwrap();
        assert!(store.read_all().unwrap()[0].cover_url.is_some());
        store.update_field("Uprooted", Field::Cover, "-").unwrap();
        assert!(store.read_all().unwrap()[0].cover_url.is_none());
    }

    #[test]
    fn test_delete() {
        let mut store = sample();
        store.delete("Uprooted").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.delete("Uprooted").is_err());
    }

    #[test]
    fn test_replace_directory() {
        let mut store = sample();
        store
            .replace_directory(&["Donna Tartt".to_string(), "Naomi Novik".to_string()])
            .unwrap();
        assert_eq!(store.directory().len(), 2);
        store.replace_directory(&[]).unwrap();
        assert!(store.directory().is_empty());
    }
}
