//! Read status of a record

use serde::{Deserialize, Serialize};

/// Whether a book has been read or is still on the wishlist.
///
/// The backing sheet stores the German labels `"Gelesen"` and
/// `"Wunschliste"`; those stay the wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReadStatus {
    #[default]
    Read,
    Wishlist,
}

impl ReadStatus {
    /// The cell value written to the sheet.
    pub fn as_sheet_value(&self) -> &'static str {
        match self {
            ReadStatus::Read => "Gelesen",
            ReadStatus::Wishlist => "Wunschliste",
        }
    }

    /// Parse a status cell. Empty or unrecognized values count as read,
    /// matching how rows without a status column were backfilled.
    pub fn from_sheet_value(value: &str) -> Self {
        match value.trim() {
            "Wunschliste" => ReadStatus::Wishlist,
            _ => ReadStatus::Read,
        }
    }

    pub fn is_wishlist(&self) -> bool {
        matches!(self, ReadStatus::Wishlist)
    }
}
