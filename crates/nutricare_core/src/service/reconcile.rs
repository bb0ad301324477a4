//! Matching imported name lists against stored students.
//!
//! Imported sheets carry free-form names and a combined grade/section cell.
//! Matches are best effort and may be false positives; callers review them.

use crate::model::grade::GradeSection;
use crate::model::nutrition::StudentId;
use crate::model::student::StudentRecord;
use crate::resolve::{names_loose_match, normalize_grade_section};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of an imported list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRow {
    pub name: String,
    /// Raw combined cell, e.g. `"Grade 3 - ST. JOHN"`.
    pub grade_section: String,
    pub bmi: Option<f64>,
}

impl ImportedRow {
    pub fn new(name: impl Into<String>, grade_section: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade_section: grade_section.into(),
            bmi: None,
        }
    }
}

/// Outcome of reconciling one imported list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Imported row index to matched student.
    pub matches: BTreeMap<usize, StudentId>,
    /// Indices of imported rows without a match, ascending.
    pub unmatched: Vec<usize>,
}

impl Reconciliation {
    pub fn matched_count(&self) -> usize {
        self.matches.len()
    }
}

/// Matches every imported row to at most one student.
///
/// A unique exact (upper-cased, trimmed) name match wins. Otherwise the first
/// loosely matching student is taken, preferring one whose resolved
/// grade/section equals the row's.
pub fn reconcile(students: &[StudentRecord], imported: &[ImportedRow]) -> Reconciliation {
    let keyed: Vec<(String, GradeSection)> = students
        .iter()
        .map(|student| (exact_key(&student.name), student.grade_section()))
        .collect();

    let mut result = Reconciliation::default();
    for (index, row) in imported.iter().enumerate() {
        match match_row(students, &keyed, row) {
            Some(student_id) => {
                result.matches.insert(index, student_id);
            }
            None => result.unmatched.push(index),
        }
    }

    info!(
        "event=reconcile module=service status=ok students={} imported={} matched={} unmatched={}",
        students.len(),
        imported.len(),
        result.matches.len(),
        result.unmatched.len()
    );
    result
}

fn match_row(
    students: &[StudentRecord],
    keyed: &[(String, GradeSection)],
    row: &ImportedRow,
) -> Option<StudentId> {
    let key = exact_key(&row.name);
    if key.is_empty() {
        return None;
    }

    let mut exact = keyed
        .iter()
        .enumerate()
        .filter(|(_, (student_key, _))| *student_key == key);
    if let (Some((position, _)), None) = (exact.next(), exact.next()) {
        return Some(students[position].id);
    }

    let wanted = normalize_grade_section(&row.grade_section);
    let mut first_loose = None;
    for (student, (_, grade_section)) in students.iter().zip(keyed) {
        if !names_loose_match(&row.name, &student.name) {
            continue;
        }
        if *grade_section == wanted {
            return Some(student.id);
        }
        if first_loose.is_none() {
            first_loose = Some(student.id);
        }
    }
    first_loose
}

fn exact_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{reconcile, ImportedRow};
    use crate::model::student::StudentRecord;

    #[test]
    fn unique_exact_name_wins_over_loose_candidates() {
        let students = vec![
            StudentRecord::new("Santos, Maria", "3", "ST. JOHN"),
            StudentRecord::new("Maria Clara Reyes", "3", "ST. JOHN"),
        ];
        let imported = vec![ImportedRow::new("  maria clara   REYES ", "Grade 5 - RUBY")];

        let result = reconcile(&students, &imported);
        assert_eq!(result.matches.get(&0), Some(&students[1].id));
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn loose_match_prefers_same_grade_section() {
        let students = vec![
            StudentRecord::new("Dela Cruz, Juan", "4", "MAKA-DIYOS"),
            StudentRecord::new("Dela Cruz, Pedro", "3", "ST. JOHN"),
        ];
        let imported = vec![ImportedRow::new("Pedro Dela Cruz Jr", "Grade 3 - ST. JOHN")];

        let result = reconcile(&students, &imported);
        assert_eq!(result.matches.get(&0), Some(&students[1].id));
    }

    #[test]
    fn loose_match_falls_back_to_first_candidate() {
        let students = vec![
            StudentRecord::new("Bautista, Ana", "1", "SAMPAGUITA"),
            StudentRecord::new("Bautista, Lea", "2", "Sunflower"),
        ];
        let imported = vec![ImportedRow::new("Bautista", "")];

        let result = reconcile(&students, &imported);
        assert_eq!(result.matches.get(&0), Some(&students[0].id));
    }

    #[test]
    fn duplicate_exact_names_use_grade_section_to_break_tie() {
        let students = vec![
            StudentRecord::new("Jose Rizal", "5", "RUBY"),
            StudentRecord::new("Jose Rizal", "6", "AMETHYST"),
        ];
        let imported = vec![ImportedRow::new("JOSE RIZAL", "6 - AMETHYST")];

        let result = reconcile(&students, &imported);
        assert_eq!(result.matches.get(&0), Some(&students[1].id));
    }

    #[test]
    fn blank_and_unknown_names_are_unmatched() {
        let students = vec![StudentRecord::new("Ana Lopez", "K1", "MASAYAHIN")];
        let imported = vec![
            ImportedRow::new("   ", "K1 - MASAYAHIN"),
            ImportedRow::new("Miguel Torres", "K1 - MASAYAHIN"),
            ImportedRow::new("Lopez Ana", "K1 - MASAYAHIN"),
        ];

        let result = reconcile(&students, &imported);
        assert_eq!(result.unmatched, vec![0, 1]);
        assert_eq!(result.matches.get(&2), Some(&students[0].id));
        assert_eq!(result.matched_count(), 1);
    }
}
