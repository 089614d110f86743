//! Author text normalization
//!
//! Author cells accumulate invisible drift: decomposed accents pasted from
//! other apps, non-breaking spaces from the web, doubled spaces from
//! manual edits. The clean form is what clustering and alias resolution
//! compare.

use unicode_normalization::UnicodeNormalization;

/// Normalize an author cell for comparison and storage.
///
/// Applies Unicode NFKC composition, maps non-breaking spaces to plain
/// spaces, collapses whitespace runs and trims. Case and diacritics are
/// kept; this is a spelling cleanup, not a fold.
pub fn clean_author(author: &str) -> String {
    let composed: String = author
        .nfkc()
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect();

    collapse_whitespace(&composed).trim().to_string()
}

/// Collapse multiple whitespace characters into a single space.
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
