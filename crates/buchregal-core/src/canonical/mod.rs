//! Author canonicalization
//!
//! Keeps author attribution consistent across free-text records: cleans
//! Unicode and whitespace drift, folds short-form aliases into their
//! longest known spelling, rewrites the store and republishes the author
//! directory.

pub mod normalization;
pub mod pass;
pub mod resolution;

pub use normalization::clean_author;
pub use pass::{
    canonicalize_authors, canonicalize_authors_paced, confirmed_authors, CleanupReport,
    RecordAction, RecordOutcome,
};
pub use resolution::{build_replacements, MIN_ALIAS_GAP};
