//! BMI classification and batch status recalculation.
//!
//! # Responsibility
//! - Map one BMI value to a `NutritionStatus` using fixed thresholds.
//! - Compute which students need a status change from their latest BMI.
//!
//! # Invariants
//! - Bands are half-open; boundary values belong to the higher band.
//! - Non-finite and non-positive BMI values are never classified.
//! - Recalculation is pure: it plans updates and never touches storage.

use crate::model::nutrition::{BmiRecord, BmiRecordId, NutritionStatus, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SEVERELY_WASTED_BELOW: f64 = 12.0;
const WASTED_BELOW: f64 = 14.0;
const NORMAL_BELOW: f64 = 18.5;
const OVERWEIGHT_BELOW: f64 = 23.0;

/// Classifies one BMI value.
///
/// | BMI            | Status          |
/// |----------------|-----------------|
/// | < 12           | Severely Wasted |
/// | 12 ..< 14      | Wasted          |
/// | 14 ..< 18.5    | Normal          |
/// | 18.5 ..< 23    | Overweight      |
/// | >= 23          | Obese           |
///
/// Returns `None` for NaN, infinities and values `<= 0`.
pub fn classify(bmi: f64) -> Option<NutritionStatus> {
    if !bmi.is_finite() || bmi <= 0.0 {
        return None;
    }
    let status = match bmi {
        b if b < SEVERELY_WASTED_BELOW => NutritionStatus::SeverelyWasted,
        b if b < WASTED_BELOW => NutritionStatus::Wasted,
        b if b < NORMAL_BELOW => NutritionStatus::Normal,
        b if b < OVERWEIGHT_BELOW => NutritionStatus::Overweight,
        _ => NutritionStatus::Obese,
    };
    Some(status)
}

/// Current stored status of one student, as input to recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentStatus {
    pub student_id: StudentId,
    pub nutrition_status: Option<NutritionStatus>,
}

/// One status change to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub student_id: StudentId,
    /// Latest BMI record the status was computed from.
    pub record_id: BmiRecordId,
    pub status: NutritionStatus,
}

/// Result of a recalculation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcPlan {
    /// Updates in student input order.
    pub updates: Vec<StatusUpdate>,
    /// Students examined.
    pub scanned: usize,
    /// Students without any BMI history.
    pub without_history: usize,
    /// Students whose latest BMI could not be classified.
    pub unclassifiable: usize,
    /// Students whose stored status already matches.
    pub unchanged: usize,
}

/// Picks the latest measurement per student.
///
/// Ties on `recorded_at` keep the first record seen, so a history sorted by
/// descending time resolves to its first row per student.
pub fn latest_records(history: &[BmiRecord]) -> HashMap<StudentId, &BmiRecord> {
    let mut latest: HashMap<StudentId, &BmiRecord> = HashMap::new();
    for record in history {
        latest
            .entry(record.student_id)
            .and_modify(|current| {
                if record.recorded_at > current.recorded_at {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    latest
}

/// Plans status updates from each student's latest BMI measurement.
///
/// Students with no history are left untouched. A student whose latest BMI
/// cannot be classified is skipped rather than falling back to an older
/// measurement. History rows for students not in `students` are ignored.
pub fn recalculate(students: &[StudentStatus], history: &[BmiRecord]) -> RecalcPlan {
    let latest = latest_records(history);
    let mut plan = RecalcPlan {
        scanned: students.len(),
        ..RecalcPlan::default()
    };

    for student in students {
        let Some(record) = latest.get(&student.student_id) else {
            plan.without_history += 1;
            continue;
        };
        let Some(status) = classify(record.bmi) else {
            plan.unclassifiable += 1;
            continue;
        };
        if student.nutrition_status == Some(status) {
            plan.unchanged += 1;
            continue;
        }
        plan.updates.push(StatusUpdate {
            student_id: student.student_id,
            record_id: record.id,
            status,
        });
    }

    plan
}
