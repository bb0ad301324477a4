//! Nutrition status and BMI measurement model.
//!
//! # Responsibility
//! - Define the ordinal nutrition status categories and their labels.
//! - Define the BMI measurement record owned by the record store.
//!
//! # Invariants
//! - `NutritionStatus` ordering follows increasing BMI thresholds.
//! - A missing status (`None`) is distinct from every category; the labels
//!   `Unknown` and `-` parse to `None`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a student row.
pub type StudentId = Uuid;

/// Stable identifier of a BMI measurement row.
pub type BmiRecordId = Uuid;

/// Nutrition status category derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutritionStatus {
    #[serde(rename = "Severely Wasted")]
    SeverelyWasted,
    #[serde(rename = "Wasted")]
    Wasted,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl NutritionStatus {
    /// All categories in ascending order.
    pub const ALL: [NutritionStatus; 5] = [
        NutritionStatus::SeverelyWasted,
        NutritionStatus::Wasted,
        NutritionStatus::Normal,
        NutritionStatus::Overweight,
        NutritionStatus::Obese,
    ];

    /// Display label, also used as the stored column value.
    pub fn label(self) -> &'static str {
        match self {
            Self::SeverelyWasted => "Severely Wasted",
            Self::Wasted => "Wasted",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Parses a stored or user-entered label.
    ///
    /// Case, underscores, hyphens and repeated spaces are ignored, so
    /// `"severely_wasted"` and `"SEVERELY  WASTED"` both parse. Placeholder
    /// labels (`Unknown`, `-`, empty) and unrecognized text return `None`.
    pub fn parse_label(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-' | '\t'))
            .flat_map(char::to_lowercase)
            .collect();

        match compact.as_str() {
            "severelywasted" => Some(Self::SeverelyWasted),
            "wasted" => Some(Self::Wasted),
            "normal" => Some(Self::Normal),
            "overweight" => Some(Self::Overweight),
            "obese" => Some(Self::Obese),
            _ => None,
        }
    }
}

impl Display for NutritionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One BMI measurement of a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    pub id: BmiRecordId,
    pub student_id: StudentId,
    pub bmi: f64,
    /// Unix epoch milliseconds of the measurement.
    pub recorded_at: i64,
    pub nutrition_status: Option<NutritionStatus>,
}

impl BmiRecord {
    /// Creates an unclassified measurement with a generated ID.
    pub fn new(student_id: StudentId, bmi: f64, recorded_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            bmi,
            recorded_at,
            nutrition_status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NutritionStatus;

    #[test]
    fn parse_label_is_tolerant_of_spelling() {
        assert_eq!(
            NutritionStatus::parse_label("Severely Wasted"),
            Some(NutritionStatus::SeverelyWasted)
        );
        assert_eq!(
            NutritionStatus::parse_label("severely_wasted"),
            Some(NutritionStatus::SeverelyWasted)
        );
        assert_eq!(
            NutritionStatus::parse_label(" OVERWEIGHT "),
            Some(NutritionStatus::Overweight)
        );
    }

    #[test]
    fn placeholder_labels_mean_no_status() {
        assert_eq!(NutritionStatus::parse_label("Unknown"), None);
        assert_eq!(NutritionStatus::parse_label("-"), None);
        assert_eq!(NutritionStatus::parse_label(""), None);
    }

    #[test]
    fn ordering_follows_bmi_bands() {
        let mut sorted = NutritionStatus::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, NutritionStatus::ALL.to_vec());
        assert!(NutritionStatus::Wasted < NutritionStatus::Obese);
    }
}
