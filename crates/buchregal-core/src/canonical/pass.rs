//! The canonicalization pass
//!
//! One full-table, best-effort sweep: read everything, compute clean forms
//! and alias replacements, rewrite drifted author cells record by record,
//! then republish the author directory. The pass never raises to its
//! caller; every failure lands in the [`CleanupReport`].

use std::collections::BTreeSet;
use std::time::Duration;

use buchregal_domain::{is_blank_author, Book};
use tracing::{debug, warn};

use crate::store::{Field, RecordStore, StoreError};

use super::normalization::clean_author;
use super::resolution::build_replacements;

/// What happened to one record during the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// The author cell was rewritten to a canonical longer form.
    Canonicalized { from: String, to: String },
    /// The cell only needed Unicode/whitespace self-healing.
    Normalized { from: String, to: String },
    Unchanged,
    /// The rewrite failed; the loop moved on.
    Failed { error: StoreError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub title: String,
    pub action: RecordAction,
}

/// Typed result of a full pass.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub records: Vec<RecordOutcome>,
    /// Set when the initial read failed; the pass did nothing else.
    pub read_error: Option<StoreError>,
    /// Set when the directory republish failed. Rewrites are not rolled back.
    pub directory_error: Option<StoreError>,
}

impl CleanupReport {
    pub fn rewritten(&self) -> usize {
        self.records
            .iter()
            .filter(|o| {
                matches!(
                    o.action,
                    RecordAction::Canonicalized { .. } | RecordAction::Normalized { .. }
                )
            })
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|o| matches!(o.action, RecordAction::Failed { .. }))
            .count()
    }

    /// True when the store was already canonical and nothing was written.
    pub fn is_clean_pass(&self) -> bool {
        self.read_error.is_none() && self.rewritten() == 0 && self.failed() == 0
    }
}

/// Run the pass without pacing between writes.
pub fn canonicalize_authors<S: RecordStore + ?Sized>(store: &mut S) -> CleanupReport {
    canonicalize_authors_paced(store, Duration::ZERO)
}

/// Run the pass, sleeping `write_delay` after each cell write to stay
/// under the remote quota.
pub fn canonicalize_authors_paced<S: RecordStore + ?Sized>(
    store: &mut S,
    write_delay: Duration,
) -> CleanupReport {
    let mut report = CleanupReport::default();

    let mut books = match store.read_all() {
        Ok(books) => books,
        Err(error) => {
            warn!(%error, "canonicalization aborted: read failed");
            report.read_error = Some(error);
            return report;
        }
    };

    let clean_names: Vec<String> = books
        .iter()
        .filter(|b| !is_blank_author(&b.author))
        .map(|b| clean_author(&b.author))
        .collect();
    let replacements = build_replacements(&clean_names);

    for book in &mut books {
        let raw = book.author.clone();
        if is_blank_author(&raw) {
            report.records.push(RecordOutcome {
                title: book.title.clone(),
                action: RecordAction::Unchanged,
            });
            continue;
        }

        let clean = clean_author(&raw);
        let desired = replacements.get(&clean).unwrap_or(&clean);

        let action = if raw == *desired {
            RecordAction::Unchanged
        } else {
            match store.update_field(&book.title, Field::Author, desired) {
                Ok(()) => {
                    if !write_delay.is_zero() {
                        std::thread::sleep(write_delay);
                    }
                    book.author = desired.clone();
                    if replacements.contains_key(&clean) {
                        debug!(title = %book.title, from = %raw, to = %desired, "author canonicalized");
                        RecordAction::Canonicalized {
                            from: raw,
                            to: desired.clone(),
                        }
                    } else {
                        debug!(title = %book.title, from = %raw, to = %desired, "author normalized");
                        RecordAction::Normalized {
                            from: raw,
                            to: desired.clone(),
                        }
                    }
                }
                Err(error) => {
                    warn!(title = %book.title, %error, "author rewrite skipped");
                    RecordAction::Failed { error }
                }
            }
        };

        report.records.push(RecordOutcome {
            title: book.title.clone(),
            action,
        });
    }

    // Republish from a fresh read; fall back to the rewritten snapshot when
    // the store will not answer.
    let directory_books = store.read_all().unwrap_or(books);
    let directory = confirmed_authors(&directory_books);
    if let Err(error) = store.replace_directory(&directory) {
        warn!(%error, "author directory republish failed");
        report.directory_error = Some(error);
    }

    report
}

/// Distinct authors over records that are not on the wishlist, sorted.
/// Books not yet read do not contribute confirmed authors.
pub fn confirmed_authors(books: &[Book]) -> Vec<String> {
    let set: BTreeSet<String> = books
        .iter()
        .filter(|b| !b.status.is_wishlist())
        .filter(|b| !is_blank_author(&b.author))
        .map(|b| b.author.trim().to_string())
        .collect();
    set.into_iter().collect()
}
