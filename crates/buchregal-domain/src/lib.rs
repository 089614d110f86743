//! buchregal-domain: domain types for the buchregal personal library suite
//!
//! Provides the `Book` record, its read status, and the small text
//! helpers shared by the core library (quick entry parsing, blank
//! author detection).

pub mod book;
pub mod entry;
pub mod status;

pub use book::{parse_added_on, parse_rating, Book};
pub use entry::{is_blank_author, parse_quick_entry};
pub use status::ReadStatus;
