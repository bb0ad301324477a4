//! Section name normalization and roster lookup.

use crate::model::grade::GradeKey;
use crate::model::roster::CANONICAL_ROSTER;
use once_cell::sync::Lazy;

/// Roster with every section pre-normalized, in roster order.
static NORMALIZED_ROSTER: Lazy<Vec<(GradeKey, Vec<String>)>> = Lazy::new(|| {
    CANONICAL_ROSTER
        .iter()
        .map(|(grade, sections)| {
            let normalized = sections
                .iter()
                .map(|section| normalize_section_name(section))
                .collect();
            (*grade, normalized)
        })
        .collect()
});

/// Returns whether `ch` is a hyphen or one of its Unicode dash look-alikes.
pub(crate) fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '\u{2010}'..='\u{2015}' | '\u{2212}')
}

/// Normalizes a section string for display and comparison.
///
/// Trims surrounding quotes, maps dash variants to `-`, replaces characters
/// outside `[A-Za-z0-9 &.-]` with spaces, collapses whitespace and uppercases.
/// Never fails; empty input yields an empty string.
pub fn normalize_section_name(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches('"').trim_matches('\'');

    let cleaned: String = unquoted
        .chars()
        .map(|ch| {
            if is_dash(ch) {
                '-'
            } else if ch.is_ascii_alphanumeric() || matches!(ch, '&' | '.') {
                ch
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Finds the first grade, in roster order, listing `section`.
///
/// `section` is normalized before lookup. Empty input never matches.
pub fn find_grade_for_section(section: &str) -> Option<GradeKey> {
    let needle = normalize_section_name(section);
    if needle.is_empty() {
        return None;
    }
    NORMALIZED_ROSTER
        .iter()
        .find(|(_, sections)| sections.iter().any(|candidate| *candidate == needle))
        .map(|(grade, _)| *grade)
}

/// Returns whether `section` is on the roster of `grade`.
pub fn section_in_roster(grade: GradeKey, section: &str) -> bool {
    let needle = normalize_section_name(section);
    if needle.is_empty() {
        return false;
    }
    NORMALIZED_ROSTER
        .iter()
        .filter(|(key, _)| *key == grade)
        .any(|(_, sections)| sections.iter().any(|candidate| *candidate == needle))
}
