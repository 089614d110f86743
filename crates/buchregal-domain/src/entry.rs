//! Quick entry parsing
//!
//! The add form takes a single `"Titel, Autor"` line; everything after the
//! first comma belongs to the author so names like "Le Guin, Ursula K."
//! survive as typed.

/// Split a quick-entry line into title and author.
///
/// Returns `None` when the line has no comma or either side is empty,
/// which the form reports as a format error.
pub fn parse_quick_entry(input: &str) -> Option<(String, String)> {
    let (title, author) = input.split_once(',')?;
    let title = title.trim();
    let author = author.trim();
    if title.is_empty() || author.is_empty() {
        return None;
    }
    Some((title.to_string(), author.to_string()))
}

/// True when an author cell holds no usable text.
pub fn is_blank_author(author: &str) -> bool {
    author.trim().is_empty()
}
