//! Student and attendance records.
//!
//! # Responsibility
//! - Define the stored student shape with raw grade/section columns.
//! - Define daily attendance marks.
//! - Validate records before they reach the store.
//!
//! # Invariants
//! - `grade_level` and `section` are kept verbatim; canonical values are
//!   derived on read through `resolve::resolve_student_fields`.
//! - Attendance dates are `YYYY-MM-DD`.

use crate::model::grade::GradeSection;
use crate::model::nutrition::{NutritionStatus, StudentId};
use crate::resolve::resolve_student_fields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Validation failure for records entering the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyStudentName,
    InvalidAttendanceDate(String),
    NonFiniteBmi,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentName => write!(f, "student name cannot be empty"),
            Self::InvalidAttendanceDate(value) => {
                write!(f, "attendance date must be YYYY-MM-DD, got `{value}`")
            }
            Self::NonFiniteBmi => write!(f, "bmi must be a finite number"),
        }
    }
}

impl Error for ValidationError {}

/// Stored student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    /// Raw grade column, e.g. `"3"`, `"GRADE 3"`, `"K"`.
    pub grade_level: String,
    /// Raw section column.
    pub section: String,
    pub sex: String,
    pub nutrition_status: Option<NutritionStatus>,
}

impl StudentRecord {
    /// Creates a student with a generated stable ID and no status.
    pub fn new(
        name: impl Into<String>,
        grade_level: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            grade_level: grade_level.into(),
            section: section.into(),
            sex: String::new(),
            nutrition_status: None,
        }
    }

    /// Canonical grade/section derived from the raw columns.
    pub fn grade_section(&self) -> GradeSection {
        resolve_student_fields(&self.grade_level, &self.section)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        Ok(())
    }
}

/// Daily attendance mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }
}

/// One attendance mark for one student on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_calendar_date(&self.date) {
            Ok(())
        } else {
            Err(ValidationError::InvalidAttendanceDate(self.date.clone()))
        }
    }
}

/// Whether `value` is a real calendar day written as zero-padded `YYYY-MM-DD`.
pub fn is_calendar_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string() == value)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{is_calendar_date, AttendanceStatus, StudentRecord, ValidationError};
    use crate::model::grade::{GradeKey, ResolvedGrade};

    #[test]
    fn grade_section_resolves_raw_columns() {
        let student = StudentRecord::new("Pedro Ramirez", "3", "st. john");
        let resolved = student.grade_section();
        assert_eq!(resolved.grade, ResolvedGrade::Known(GradeKey::Grade3));
        assert_eq!(resolved.section, "ST. JOHN");
    }

    #[test]
    fn validate_rejects_blank_name() {
        let student = StudentRecord::new("   ", "1", "KIWI");
        assert_eq!(student.validate(), Err(ValidationError::EmptyStudentName));
    }

    #[test]
    fn calendar_date_shape() {
        assert!(is_calendar_date("2025-06-30"));
        assert!(!is_calendar_date("2025-13-01"));
        assert!(!is_calendar_date("2025/06/30"));
        assert!(!is_calendar_date("25-06-30"));
        assert!(!is_calendar_date("2025-6-30"));
    }

    #[test]
    fn calendar_date_rejects_impossible_days() {
        assert!(!is_calendar_date("2025-02-29"));
        assert!(!is_calendar_date("2025-02-30"));
        assert!(!is_calendar_date("2025-02-31"));
        assert!(!is_calendar_date("2025-04-31"));
        assert!(!is_calendar_date("2025-00-10"));
        assert!(is_calendar_date("2024-02-29"));
        assert!(is_calendar_date("2025-12-31"));
    }

    #[test]
    fn attendance_labels() {
        assert_eq!(
            AttendanceStatus::parse_label(" present "),
            Some(AttendanceStatus::Present)
        );
        assert_eq!(AttendanceStatus::parse_label("late"), None);
    }
}
