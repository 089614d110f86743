//! Author suggestion for quick entry
//!
//! When a book is added as "Titel, Novik" the short name is resolved
//! against the confirmed authors before it ever lands in the sheet, so
//! most aliases never need the cleanup pass.

use strsim::jaro_winkler;
use tracing::debug;

/// Resolve a typed author against the known (confirmed) authors.
///
/// Scans known names longest-first and returns the first that contains
/// the input case-insensitively; otherwise the input is returned as
/// typed. Near misses are logged to help spot typos, never acted on.
pub fn suggest_author(input: &str, known: &[String]) -> String {
    let typed = input.trim();
    if typed.is_empty() {
        return String::new();
    }
    let needle = typed.to_lowercase();

    let mut candidates: Vec<&String> = known.iter().collect();
    candidates.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });

    for name in &candidates {
        if name.to_lowercase().contains(&needle) {
            return (*name).clone();
        }
    }

    if let Some((best, score)) = candidates
        .iter()
        .map(|name| (name, jaro_winkler(&needle, &name.to_lowercase())))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    {
        if score > 0.85 {
            debug!(input = typed, candidate = %best, score, "near-miss author, kept as typed");
        }
    }

    typed.to_string()
}
