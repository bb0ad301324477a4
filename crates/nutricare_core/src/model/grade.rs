//! Grade keys and resolved grade/section values.
//!
//! # Responsibility
//! - Define the closed set of canonical grade keys.
//! - Parse legacy grade spellings stored in student records.
//!
//! # Invariants
//! - `GradeKey` display strings are the only grade keys exposed to callers.
//! - `GradeSection::section` is uppercase and whitespace-collapsed, or
//!   `UNKNOWN_SENTINEL`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Sentinel used when no grade or section can be resolved.
pub const UNKNOWN_SENTINEL: &str = "UNKNOWN";

/// Canonical grade level of the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeKey {
    #[serde(rename = "K1")]
    K1,
    #[serde(rename = "K2")]
    K2,
    #[serde(rename = "Grade 1")]
    Grade1,
    #[serde(rename = "Grade 2")]
    Grade2,
    #[serde(rename = "Grade 3")]
    Grade3,
    #[serde(rename = "Grade 4")]
    Grade4,
    #[serde(rename = "Grade 5")]
    Grade5,
    #[serde(rename = "Grade 6")]
    Grade6,
}

impl GradeKey {
    /// All grade keys in roster order.
    pub const ALL: [GradeKey; 8] = [
        GradeKey::K1,
        GradeKey::K2,
        GradeKey::Grade1,
        GradeKey::Grade2,
        GradeKey::Grade3,
        GradeKey::Grade4,
        GradeKey::Grade5,
        GradeKey::Grade6,
    ];

    /// Maps an elementary grade number (1..=6) to its key.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Grade1),
            2 => Some(Self::Grade2),
            3 => Some(Self::Grade3),
            4 => Some(Self::Grade4),
            5 => Some(Self::Grade5),
            6 => Some(Self::Grade6),
            _ => None,
        }
    }

    /// Canonical display string, e.g. `"Grade 3"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::K1 => "K1",
            Self::K2 => "K2",
            Self::Grade1 => "Grade 1",
            Self::Grade2 => "Grade 2",
            Self::Grade3 => "Grade 3",
            Self::Grade4 => "Grade 4",
            Self::Grade5 => "Grade 5",
            Self::Grade6 => "Grade 6",
        }
    }

    /// Parses a stored grade label.
    ///
    /// Accepts the canonical keys plus the spellings found in legacy rows:
    /// `K`, `Kinder 1`, `Kinder 2`, bare numbers, `G1`, `GRADE 1`.
    /// Matching ignores case and surrounding/internal whitespace runs.
    pub fn parse_label(value: &str) -> Option<Self> {
        let compact = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        match compact.as_str() {
            "K" | "K1" | "KINDER 1" | "KINDER1" => return Some(Self::K1),
            "K2" | "KINDER 2" | "KINDER2" => return Some(Self::K2),
            _ => {}
        }

        let digits = compact
            .strip_prefix("GRADE")
            .or_else(|| compact.strip_prefix('G'))
            .unwrap_or(compact.as_str())
            .trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u8>().ok().and_then(Self::from_number)
    }
}

impl Display for GradeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade half of a resolved grade/section pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedGrade {
    Known(GradeKey),
    Unknown,
}

impl ResolvedGrade {
    pub fn key(self) -> Option<GradeKey> {
        match self {
            Self::Known(key) => Some(key),
            Self::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Known(key) => key.as_str(),
            Self::Unknown => UNKNOWN_SENTINEL,
        }
    }
}

impl From<Option<GradeKey>> for ResolvedGrade {
    fn from(value: Option<GradeKey>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl Display for ResolvedGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical grade/section value produced by the resolver.
///
/// Never persisted; recomputed from raw input on every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeSection {
    pub grade: ResolvedGrade,
    /// Uppercase, whitespace-collapsed section or `UNKNOWN`.
    pub section: String,
}

impl GradeSection {
    /// Fully unknown value returned for empty or unusable input.
    pub fn unknown() -> Self {
        Self {
            grade: ResolvedGrade::Unknown,
            section: UNKNOWN_SENTINEL.to_string(),
        }
    }

    /// Returns whether the section half is the sentinel.
    pub fn section_is_unknown(&self) -> bool {
        self.section == UNKNOWN_SENTINEL
    }

    /// Canonical display string, `"<grade> - <section>"`.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl Display for GradeSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.grade, self.section)
    }
}
