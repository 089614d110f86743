//! Canonicalization integration tests
//!
//! Exercises the full pass against the in-memory store: alias folding,
//! Unicode self-healing, the length guard, directory republish and
//! partial-failure isolation.

use buchregal_core::canonical::{canonicalize_authors, RecordAction};
use buchregal_core::store::{Field, MemoryStore, RecordStore, StoreError};
use buchregal_domain::{Book, ReadStatus};
use proptest::prelude::*;
use test_case::test_case;

fn store_with_authors(authors: &[&str]) -> MemoryStore {
    let books = authors
        .iter()
        .enumerate()
        .map(|(i, author)| Book::new(format!("Buch {}", i), *author))
        .collect();
    MemoryStore::with_books(books)
}

fn authors_of(store: &MemoryStore) -> Vec<String> {
    store
        .read_all()
        .unwrap()
        .into_iter()
        .map(|b| b.author)
        .collect()
}

// === Alias Resolution ===

#[test]
fn test_short_forms_fold_into_longest_spelling() {
    let mut store = store_with_authors(&["Novik", "Naomi Novik", " novik "]);
    let report = canonicalize_authors(&mut store);

    assert_eq!(
        authors_of(&store),
        vec!["Naomi Novik", "Naomi Novik", "Naomi Novik"]
    );
    assert_eq!(report.rewritten(), 2);
    assert_eq!(report.failed(), 0);
}

#[test]
fn test_tie_between_hosts_is_deterministic() {
    let mut store = store_with_authors(&["Martin", "Martin Suter", "George R.R. Martin"]);
    canonicalize_authors(&mut store);

    let authors = authors_of(&store);
    // The longer host wins; the other full name is not an alias.
    assert_eq!(authors[0], "George R.R. Martin");
    assert_eq!(authors[1], "Martin Suter");
    assert_eq!(authors[2], "George R.R. Martin");
}

#[test]
fn test_unrelated_short_names_not_merged() {
    let mut store = store_with_authors(&["Lee", "Kim"]);
    let report = canonicalize_authors(&mut store);

    assert_eq!(authors_of(&store), vec!["Lee", "Kim"]);
    assert!(report.is_clean_pass());
}

// === Length Guard ===

#[test_case("Ann", "Anna", false; "gap of one does not merge")]
#[test_case("Ann", "Annik", false; "gap of two does not merge")]
#[test_case("Ann", "Annika", true; "gap of three merges")]
fn test_length_guard_boundary(short: &str, long: &str, merges: bool) {
    let mut store = store_with_authors(&[short, long]);
    canonicalize_authors(&mut store);

    let authors = authors_of(&store);
    if merges {
        assert_eq!(authors, vec![long.to_string(), long.to_string()]);
    } else {
        assert_eq!(authors, vec![short.to_string(), long.to_string()]);
    }
}

// === Unicode Self-Healing ===

#[test]
fn test_decomposed_accents_compose() {
    // Combining acute: renders identically, compares differently.
    let mut store = store_with_authors(&["Gabriel Garci\u{0301}a", "Gabriel García"]);
    let report = canonicalize_authors(&mut store);

    assert_eq!(
        authors_of(&store),
        vec!["Gabriel García", "Gabriel García"]
    );
    assert_eq!(report.rewritten(), 1);
}

#[test]
fn test_nbsp_and_doubled_spaces_heal() {
    let mut store = store_with_authors(&["Naomi\u{00A0}Novik", "Naomi  Novik"]);
    let report = canonicalize_authors(&mut store);

    assert_eq!(authors_of(&store), vec!["Naomi Novik", "Naomi Novik"]);
    assert_eq!(report.rewritten(), 2);
    assert!(report
        .records
        .iter()
        .all(|o| !matches!(o.action, RecordAction::Canonicalized { .. })));
}

#[test]
fn test_empty_author_fields_left_alone() {
    let mut store = store_with_authors(&["", "   ", "Naomi Novik"]);
    let report = canonicalize_authors(&mut store);

    assert_eq!(authors_of(&store), vec!["", "   ", "Naomi Novik"]);
    assert!(report.is_clean_pass());
}

// === Directory Republish ===

#[test]
fn test_wishlist_authors_stay_out_of_directory() {
    let mut store = MemoryStore::with_books(vec![
        Book::new("Uprooted", "Naomi Novik"),
        Book::new("Circe", "Madeline Miller").with_status(ReadStatus::Wishlist),
    ]);
    canonicalize_authors(&mut store);

    assert_eq!(store.directory(), ["Naomi Novik".to_string()]);
}

#[test]
fn test_author_with_any_read_book_is_listed() {
    let mut store = MemoryStore::with_books(vec![
        Book::new("Circe", "Madeline Miller").with_status(ReadStatus::Wishlist),
        Book::new("Das Lied des Achill", "Madeline Miller"),
    ]);
    canonicalize_authors(&mut store);

    assert_eq!(store.directory(), ["Madeline Miller".to_string()]);
}

#[test]
fn test_directory_reflects_canonical_forms() {
    let mut store = MemoryStore::with_books(vec![
        Book::new("Uprooted", "Novik"),
        Book::new("Spinning Silver", "Naomi Novik"),
        Book::new("Der Distelfink", "Donna Tartt"),
    ]);
    canonicalize_authors(&mut store);

    assert_eq!(
        store.directory(),
        ["Donna Tartt".to_string(), "Naomi Novik".to_string()]
    );
}

// === Partial Failure Isolation ===

/// Delegates to a MemoryStore but refuses author rewrites for one title,
/// simulating a row that was renamed mid-pass.
struct FlakyStore {
    inner: MemoryStore,
    refuse_title: String,
    refuse_directory: bool,
}

impl FlakyStore {
    fn new(inner: MemoryStore, refuse_title: &str) -> Self {
        Self {
            inner,
            refuse_title: refuse_title.to_string(),
            refuse_directory: false,
        }
    }
}

impl RecordStore for FlakyStore {
    fn read_all(&self) -> Result<Vec<Book>, StoreError> {
        self.inner.read_all()
    }

    fn update_field(
        &mut self,
        title: &str,
        field: Field,
        value: &str,
    ) -> Result<(), StoreError> {
        if title == self.refuse_title {
            return Err(StoreError::TitleNotFound {
                title: title.to_string(),
            });
        }
        self.inner.update_field(title, field, value)
    }

    fn append(&mut self, book: &Book) -> Result<(), StoreError> {
        self.inner.append(book)
    }

    fn delete(&mut self, title: &str) -> Result<(), StoreError> {
        self.inner.delete(title)
    }

    fn replace_directory(&mut self, names: &[String]) -> Result<(), StoreError> {
        if self.refuse_directory {
            return Err(StoreError::Backend {
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.replace_directory(names)
    }
}

#[test]
fn test_one_failing_row_does_not_stop_the_pass() {
    let inner = MemoryStore::with_books(vec![
        Book::new("Uprooted", "Novik"),
        Book::new("Spinning Silver", "Naomi Novik"),
        Book::new("Der Distelfink", "Tartt"),
        Book::new("Die geheime Geschichte", "Donna Tartt"),
    ]);
    let mut store = FlakyStore::new(inner, "Der Distelfink");
    let report = canonicalize_authors(&mut store);

    assert_eq!(report.failed(), 1);
    let authors = authors_of(&store.inner);
    assert_eq!(authors[0], "Naomi Novik");
    // The refused row keeps its short form.
    assert_eq!(authors[2], "Tartt");
    assert_eq!(authors[3], "Donna Tartt");
}

#[test]
fn test_directory_failure_is_reported_not_raised() {
    let inner = MemoryStore::with_books(vec![
        Book::new("Uprooted", "Novik"),
        Book::new("Spinning Silver", "Naomi Novik"),
    ]);
    let mut store = FlakyStore::new(inner, "keine");
    store.refuse_directory = true;
    let report = canonicalize_authors(&mut store);

    assert!(report.directory_error.is_some());
    // Rewrites landed regardless.
    assert_eq!(authors_of(&store.inner)[0], "Naomi Novik");
}

// === Idempotence ===

#[test]
fn test_second_pass_writes_nothing() {
    let mut store = store_with_authors(&["Novik", "Naomi Novik", "Naomi\u{00A0}Novik", "Tartt"]);
    let first = canonicalize_authors(&mut store);
    assert!(first.rewritten() > 0);

    let snapshot = store.read_all().unwrap();
    let second = canonicalize_authors(&mut store);
    assert!(second.is_clean_pass());
    assert_eq!(store.read_all().unwrap(), snapshot);
}

proptest! {
    #[test]
    fn test_pass_is_idempotent_for_arbitrary_authors(
        authors in proptest::collection::vec("[A-Za-zÀ-ÿ]{1,6}( [A-Za-zÀ-ÿ]{1,8}){0,2}", 0..12)
    ) {
        let refs: Vec<&str> = authors.iter().map(|s| s.as_str()).collect();
        let mut store = store_with_authors(&refs);
        canonicalize_authors(&mut store);

        let snapshot = store.read_all().unwrap();
        let directory = store.directory().to_vec();
        let second = canonicalize_authors(&mut store);

        prop_assert!(second.is_clean_pass(), "second pass rewrote records");
        prop_assert_eq!(store.read_all().unwrap(), snapshot);
        prop_assert_eq!(store.directory(), directory.as_slice());
    }

    #[test]
    fn test_no_short_alias_survives_a_pass(
        base in "[A-Z][a-z]{4,8} [A-Z][a-z]{4,8}"
    ) {
        // A record holding a qualifying prefix of another author never
        // keeps the short form.
        let short: String = base.chars().take(4).collect();
        let refs = [short.as_str(), base.as_str()];
        let mut store = store_with_authors(&refs);
        canonicalize_authors(&mut store);

        let authors = authors_of(&store);
        prop_assert_eq!(&authors[0], &base);
        prop_assert_eq!(&authors[1], &base);
    }
}
