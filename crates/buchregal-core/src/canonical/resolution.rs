//! Substring alias resolution
//!
//! Short forms like "Novik" are folded into the longest known spelling
//! ("Naomi Novik") by pure case-insensitive substring containment. No
//! word-boundary anchoring: "Erin" matching inside "Katherine" is an
//! accepted imprecision at personal-library scale.

use std::collections::HashMap;

/// A candidate superstring must be more than this many characters longer
/// than the short form. Guards against folding near-equal names such as
/// "Ann" / "Anna" into each other.
pub const MIN_ALIAS_GAP: usize = 2;

/// Build the replacement map over distinct clean author names.
///
/// Names are ordered by length descending, ties lexicographically, so the
/// greedy first-wins resolution is deterministic. A host that is itself an
/// alias forwards to its own target, so a single pass reaches the fixpoint.
pub fn build_replacements(names: &[String]) -> HashMap<String, String> {
    let mut distinct: Vec<&str> = names
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    distinct.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    distinct.dedup();

    let mut replacements: HashMap<String, String> = HashMap::new();

    for (i, long) in distinct.iter().enumerate() {
        let long_lower = long.to_lowercase();
        let long_len = long.chars().count();
        let target = replacements
            .get(*long)
            .cloned()
            .unwrap_or_else(|| long.to_string());

        for short in &distinct[i + 1..] {
            if replacements.contains_key(*short) {
                continue;
            }
            let short_len = short.chars().count();
            if long_len > short_len + MIN_ALIAS_GAP
                && long_lower.contains(&short.to_lowercase())
            {
                replacements.insert(short.to_string(), target.clone());
            }
        }
    }

    replacements
}
