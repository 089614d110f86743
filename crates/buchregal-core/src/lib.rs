//! buchregal-core: core library for the buchregal book manager
//!
//! This library provides pure Rust implementations of:
//! - The record store abstraction over the backing sheet
//! - Author canonicalization (normalize, alias resolution, rewrite,
//!   directory republish)
//! - Author suggestion for quick entry
//! - Cover and genre lookup from Google Books and Open Library
//! - The background enrichment sweep with its single-flight guard
//! - Library operations (add, wishlist, mark read, search, author stats)

pub mod canonical;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod genre;
pub mod http;
pub mod library;
pub mod sources;
pub mod store;
pub mod suggest;

// Re-export main types for convenience
pub use canonical::{
    canonicalize_authors, canonicalize_authors_paced, clean_author, confirmed_authors,
    CleanupReport, RecordAction, RecordOutcome,
};
pub use config::{ConfigError, LibraryConfig, LlmConfig, LookupConfig, SheetConfig, SweepConfig};
pub use enrichment::{EnrichmentSweep, SweepOptions, SweepSummary};
pub use error::{LibraryError, Result};
pub use genre::shelf_genre;
pub use library::LibraryService;
pub use sources::{BookMeta, CoverLookup};
pub use store::{Field, MemoryStore, RecordStore, StoreError};
pub use suggest::suggest_author;
