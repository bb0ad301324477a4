use nutricare_core::{classify, recalculate, BmiRecord, NutritionStatus, StudentStatus};
use uuid::Uuid;

fn student(status: Option<NutritionStatus>) -> StudentStatus {
    StudentStatus {
        student_id: Uuid::new_v4(),
        nutrition_status: status,
    }
}

#[test]
fn classification_is_monotonic_over_bmi() {
    let mut previous = None;
    let mut bmi = 0.5;
    while bmi < 40.0 {
        let status = classify(bmi).unwrap();
        if let Some(previous) = previous {
            assert!(status >= previous, "{bmi} classified below a smaller value");
        }
        previous = Some(status);
        bmi += 0.05;
    }
}

#[test]
fn exact_band_boundaries() {
    assert_eq!(classify(11.999), Some(NutritionStatus::SeverelyWasted));
    assert_eq!(classify(12.0), Some(NutritionStatus::Wasted));
    assert_eq!(classify(17.0), Some(NutritionStatus::Normal));
    assert_eq!(classify(18.5), Some(NutritionStatus::Overweight));
    assert_eq!(classify(22.999), Some(NutritionStatus::Overweight));
    assert_eq!(classify(23.0), Some(NutritionStatus::Obese));
}

#[test]
fn status_labels_serialize_as_display_text() {
    let json = serde_json::to_string(&NutritionStatus::SeverelyWasted).unwrap();
    assert_eq!(json, "\"Severely Wasted\"");
    let parsed: NutritionStatus = serde_json::from_str("\"Overweight\"").unwrap();
    assert_eq!(parsed, NutritionStatus::Overweight);
}

#[test]
fn single_record_with_unknown_status_yields_one_update() {
    let current = student(None);
    let record = BmiRecord::new(current.student_id, 17.0, 1_000);

    let plan = recalculate(&[current], &[record.clone()]);
    assert_eq!(plan.updates.len(), 1);
    assert_eq!(plan.updates[0].student_id, current.student_id);
    assert_eq!(plan.updates[0].record_id, record.id);
    assert_eq!(plan.updates[0].status, NutritionStatus::Normal);
}

#[test]
fn only_latest_record_counts() {
    let current = student(Some(NutritionStatus::Normal));
    let history = vec![
        BmiRecord::new(current.student_id, 16.0, 1_000),
        BmiRecord::new(current.student_id, 24.0, 3_000),
        BmiRecord::new(current.student_id, 11.0, 2_000),
    ];

    let plan = recalculate(&[current], &history);
    assert_eq!(plan.updates.len(), 1);
    assert_eq!(plan.updates[0].record_id, history[1].id);
    assert_eq!(plan.updates[0].status, NutritionStatus::Obese);
}

#[test]
fn students_without_history_or_matching_status_are_left_out() {
    let no_history = student(None);
    let matching = student(Some(NutritionStatus::Wasted));
    let changed = student(Some(NutritionStatus::Wasted));
    let history = vec![
        BmiRecord::new(matching.student_id, 13.0, 5_000),
        BmiRecord::new(changed.student_id, 19.0, 5_000),
        BmiRecord::new(Uuid::new_v4(), 30.0, 5_000),
    ];

    let plan = recalculate(&[no_history, matching, changed], &history);
    assert_eq!(plan.scanned, 3);
    assert_eq!(plan.without_history, 1);
    assert_eq!(plan.unchanged, 1);
    assert_eq!(plan.updates.len(), 1);
    assert_eq!(plan.updates[0].student_id, changed.student_id);
    assert_eq!(plan.updates[0].status, NutritionStatus::Overweight);
}

#[test]
fn empty_inputs_plan_nothing() {
    let plan = recalculate(&[], &[]);
    assert!(plan.updates.is_empty());
    assert_eq!(plan.scanned, 0);
}
