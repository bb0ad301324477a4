//! Grade inference for free-text grade/section strings.
//!
//! # Responsibility
//! - Parse short grade prefixes (Arabic or Roman numerals).
//! - Infer a canonical grade key from a whole raw string.
//! - Produce the canonical `GradeSection` for one raw value.
//!
//! # Invariants
//! - Results only ever carry a canonical `GradeKey` or `Unknown`; numbers
//!   outside the school's grades never leak into a `GradeSection`.
//! - Whole-string inference runs before prefix parsing, because only it can
//!   use the K1/K2 roster heuristic.
//! - Roster collisions resolve to the first grade in roster order.

use crate::model::grade::{GradeKey, GradeSection, ResolvedGrade, UNKNOWN_SENTINEL};
use crate::resolve::section::{find_grade_for_section, is_dash, normalize_section_name, section_in_roster};
use once_cell::sync::Lazy;
use regex::Regex;

static KINDER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*(K[12]?)(?:\s*[-\x{2010}-\x{2015}\x{2212}\s]\s*(.*))?$")
        .expect("valid kinder token regex")
});
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]{1,2})\s*[-\x{2010}-\x{2015}\x{2212}\s]")
        .expect("valid leading number regex")
});
static LEADING_ROMAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([IVXLCDM]+)\s*[-\x{2010}-\x{2015}\x{2212}\s]")
        .expect("valid leading roman regex")
});
static GRADE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)GRADE\s*([0-9]+)").expect("valid grade word regex"));
static GRADE_NUMBER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:grade|gr\.?|g)?\s*([0-9]{1,2})$").expect("valid grade number regex")
});
static WORD_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^((?:grade|kinder)\s*[0-9]{1,2})\s+(.+)$").expect("valid word prefix regex")
});
static BARE_K_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^K\b").expect("valid bare k regex"));

const ROMAN_NUMERALS: &[(&str, u8)] = &[
    ("I", 1),
    ("II", 2),
    ("III", 3),
    ("IV", 4),
    ("V", 5),
    ("VI", 6),
    ("VII", 7),
];

/// Parses a short grade prefix.
///
/// Accepts an integer 1..=12, optionally written as `G5`, `Gr. 5` or
/// `Grade 5`, or a Roman numeral `I`..=`VII`. Returns the grade number, or
/// `None` when neither form parses or the integer is out of range.
pub fn parse_grade_prefix(raw: &str) -> Option<u8> {
    let token = raw.trim().trim_matches(|ch: char| matches!(ch, '.' | ','));
    if token.is_empty() {
        return None;
    }

    if let Some(caps) = GRADE_NUMBER_TOKEN_RE.captures(token) {
        let number = caps[1].parse::<u8>().ok()?;
        return (1..=12).contains(&number).then_some(number);
    }

    let upper = token.to_ascii_uppercase();
    ROMAN_NUMERALS
        .iter()
        .find(|(numeral, _)| *numeral == upper)
        .map(|(_, number)| *number)
}

/// Infers a canonical grade key from a whole raw grade/section string.
///
/// Strategies, first hit wins:
/// 1. leading `K`/`K1`/`K2` token, refined by the K1/K2 section rosters;
/// 2. leading one or two digit number followed by a separator;
/// 3. leading Roman numeral followed by a separator;
/// 4. embedded `GRADE <n>`;
/// 5. the whole string looked up as a section name.
///
/// A strategy that yields a number outside the school's grades does not stop
/// the chain.
pub fn infer_grade_from_raw(raw: &str) -> Option<GradeKey> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = KINDER_TOKEN_RE.captures(s) {
        let token = caps[1].to_ascii_uppercase();
        let fragment = caps.get(2).map_or("", |m| m.as_str());
        if !normalize_section_name(fragment).is_empty() {
            if section_in_roster(GradeKey::K1, fragment) {
                return Some(GradeKey::K1);
            }
            if section_in_roster(GradeKey::K2, fragment) {
                return Some(GradeKey::K2);
            }
        }
        return Some(if token == "K2" {
            GradeKey::K2
        } else {
            GradeKey::K1
        });
    }

    let leading_number = LEADING_NUMBER_RE
        .captures(s)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .and_then(GradeKey::from_number);
    if leading_number.is_some() {
        return leading_number;
    }

    let leading_roman = LEADING_ROMAN_RE
        .captures(s)
        .and_then(|caps| parse_grade_prefix(&caps[1]))
        .and_then(GradeKey::from_number);
    if leading_roman.is_some() {
        return leading_roman;
    }

    let grade_word = GRADE_WORD_RE
        .captures(s)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .and_then(GradeKey::from_number);
    if grade_word.is_some() {
        return grade_word;
    }

    find_grade_for_section(s)
}

/// Normalizes one raw grade/section string into its canonical value.
///
/// Never fails: empty or unusable input yields `UNKNOWN - UNKNOWN`, and a
/// section that cannot be split off falls back to the whole normalized input.
pub fn normalize_grade_section(raw: &str) -> GradeSection {
    let s = raw.trim();
    if s.is_empty() {
        return GradeSection::unknown();
    }

    let (prefix, remainder) = split_grade_prefix(s);
    let section = normalize_section_name(remainder);

    let grade = infer_grade_from_raw(s)
        .or_else(|| prefix.and_then(grade_from_prefix))
        .or_else(|| find_grade_for_section(&section))
        .or_else(|| BARE_K_RE.is_match(s).then_some(GradeKey::K1));

    GradeSection {
        grade: ResolvedGrade::from(grade),
        section: if section.is_empty() {
            UNKNOWN_SENTINEL.to_string()
        } else {
            section
        },
    }
}

/// Resolves records that store grade and section in separate columns.
///
/// The grade column is read as a label first (`3`, `GRADE 3`, `K`,
/// `Kinder 2`); when that fails, the combined `"<grade> - <section>"` string
/// goes through the regular inference chain.
pub fn resolve_student_fields(grade_level: &str, section: &str) -> GradeSection {
    let normalized_section = normalize_section_name(section);
    let combined = format!("{} - {}", grade_level.trim(), section.trim());

    let grade = GradeKey::parse_label(grade_level)
        .or_else(|| grade_from_prefix(grade_level))
        .or_else(|| infer_grade_from_raw(&combined))
        .or_else(|| find_grade_for_section(&normalized_section));

    GradeSection {
        grade: ResolvedGrade::from(grade),
        section: if normalized_section.is_empty() {
            UNKNOWN_SENTINEL.to_string()
        } else {
            normalized_section
        },
    }
}

fn grade_from_prefix(prefix: &str) -> Option<GradeKey> {
    GradeKey::parse_label(prefix)
        .or_else(|| parse_grade_prefix(prefix).and_then(GradeKey::from_number))
}

fn looks_like_grade_token(token: &str) -> bool {
    let token = token.trim();
    token.eq_ignore_ascii_case(UNKNOWN_SENTINEL)
        || GradeKey::parse_label(token).is_some()
        || parse_grade_prefix(token).is_some()
}

/// Splits `s` into a grade prefix and a section remainder.
///
/// Splits at the first dash when the part before it reads as a grade token,
/// otherwise at `Grade n`/`Kinder n` or the first whitespace run under the
/// same condition. An unreadable dash prefix (`Grade V`, `5th`) is dropped
/// when the text after the dash is a roster section and the whole string is
/// not. When no split applies the whole string is the section.
fn split_grade_prefix(s: &str) -> (Option<&str>, &str) {
    if let Some((idx, dash)) = s.char_indices().find(|(_, ch)| is_dash(*ch)) {
        let prefix = s[..idx].trim();
        let rest = s[idx + dash.len_utf8()..].trim();
        if rest.is_empty() {
            return (None, s);
        }
        if looks_like_grade_token(prefix) {
            return (Some(prefix), rest);
        }
        if find_grade_for_section(s).is_none() && find_grade_for_section(rest).is_some() {
            return (None, rest);
        }
        return (None, s);
    }

    if let Some(caps) = WORD_PREFIX_RE.captures(s) {
        if let (Some(prefix), Some(rest)) = (caps.get(1), caps.get(2)) {
            return (Some(prefix.as_str()), rest.as_str().trim());
        }
    }

    let mut parts = s.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or_default();
    if let Some(rest) = parts.next().map(str::trim) {
        if !rest.is_empty() && looks_like_grade_token(first) {
            return (Some(first), rest);
        }
    }

    (None, s)
}
