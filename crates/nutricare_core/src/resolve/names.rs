//! Loose name matching for reconciling independently sourced name lists.
//!
//! A match here is a hint, never an identity guarantee: the rule accepts any
//! shared token, so callers must tolerate false positives.

/// Splits a display name into lowercase tokens.
///
/// Commas become spaces, punctuation other than hyphen and apostrophe is
/// dropped, whitespace is collapsed.
pub fn tokenize_name(name: &str) -> Vec<String> {
    let cleaned: String = name
        .chars()
        .filter_map(|ch| {
            if ch == ',' {
                Some(' ')
            } else if ch.is_alphanumeric() || ch.is_whitespace() || matches!(ch, '_' | '\'' | '-')
            {
                Some(ch)
            } else {
                None
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Canonical orderings of a name: full, `last first`, `last first-two`,
/// `first last`. Duplicates are removed, first occurrence kept.
pub fn name_variants(name: &str) -> Vec<String> {
    let tokens = tokenize_name(name);
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Vec::new();
    };

    let full = tokens.join(" ");
    let first_two = tokens.iter().take(2).cloned().collect::<Vec<_>>().join(" ");
    let candidates = [
        full,
        format!("{last} {first}"),
        format!("{last} {first_two}"),
        format!("{first} {last}"),
    ];

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

/// Returns whether two display names plausibly refer to the same person.
///
/// True when any pair of variants is equal, one contains the other, or the
/// two share at least one token. Blank names never match.
pub fn names_loose_match(a: &str, b: &str) -> bool {
    let left = name_variants(a);
    let right = name_variants(b);

    left.iter().any(|x| {
        right.iter().any(|y| {
            if x == y || x.contains(y.as_str()) || y.contains(x.as_str()) {
                return true;
            }
            x.split(' ').any(|token| y.split(' ').any(|other| other == token))
        })
    })
}
