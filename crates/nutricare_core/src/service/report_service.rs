//! Grade-level nutrition and attendance reports.
//!
//! # Responsibility
//! - Count nutrition statuses over a population.
//! - Filter report rows by grade, section, status and free text.
//! - Summarize daily attendance for the grade population.
//!
//! # Invariants
//! - Summary counts cover the grade population; section, status and search
//!   filters only narrow the listed rows.
//! - Grade/section values always come from the shared resolver.

use crate::classify::latest_records;
use crate::model::grade::{GradeKey, GradeSection};
use crate::model::nutrition::{NutritionStatus, StudentId};
use crate::model::student::{AttendanceStatus, StudentRecord};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::bmi_repo::BmiRepository;
use crate::repo::student_repo::{StudentListQuery, StudentRepository};
use crate::resolve::normalize_section_name;
use crate::service::ServiceError;
use log::info;
use serde::Serialize;

/// Per-status counts over a population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub severely_wasted: usize,
    pub wasted: usize,
    pub normal: usize,
    pub overweight: usize,
    pub obese: usize,
    /// Rows without a status.
    pub unknown: usize,
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = Option<NutritionStatus>>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.total += 1;
            match status {
                Some(NutritionStatus::SeverelyWasted) => counts.severely_wasted += 1,
                Some(NutritionStatus::Wasted) => counts.wasted += 1,
                Some(NutritionStatus::Normal) => counts.normal += 1,
                Some(NutritionStatus::Overweight) => counts.overweight += 1,
                Some(NutritionStatus::Obese) => counts.obese += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }

    pub fn count(&self, status: Option<NutritionStatus>) -> usize {
        match status {
            Some(NutritionStatus::SeverelyWasted) => self.severely_wasted,
            Some(NutritionStatus::Wasted) => self.wasted,
            Some(NutritionStatus::Normal) => self.normal,
            Some(NutritionStatus::Overweight) => self.overweight,
            Some(NutritionStatus::Obese) => self.obese,
            None => self.unknown,
        }
    }
}

/// One student line in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub student_id: StudentId,
    pub name: String,
    pub grade_section: GradeSection,
    pub nutrition_status: Option<NutritionStatus>,
    pub bmi: Option<f64>,
    pub attendance: Option<AttendanceStatus>,
}

impl ReportRow {
    pub fn from_student(
        student: &StudentRecord,
        latest_bmi: Option<f64>,
        attendance: Option<AttendanceStatus>,
    ) -> Self {
        Self {
            student_id: student.id,
            name: student.name.trim().to_string(),
            grade_section: student.grade_section(),
            nutrition_status: student.nutrition_status,
            bmi: latest_bmi,
            attendance,
        }
    }

    pub fn is_present(&self) -> bool {
        self.attendance == Some(AttendanceStatus::Present)
    }
}

/// Status filter; `Missing` selects rows without a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Is(NutritionStatus),
    Missing,
}

impl StatusFilter {
    fn matches(self, status: Option<NutritionStatus>) -> bool {
        match self {
            Self::Is(expected) => status == Some(expected),
            Self::Missing => status.is_none(),
        }
    }
}

/// Report filters; `None` fields mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub grade: Option<GradeKey>,
    pub section: Option<String>,
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
}

/// Summary plus filtered rows for one grade (or the whole school).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    /// Present share of `total` in percent, one decimal; `0.0` when empty.
    pub present_pct: f64,
    pub status_counts: StatusCounts,
    pub rows: Vec<ReportRow>,
}

/// Builds a report from already resolved rows.
pub fn build_report(rows: &[ReportRow], filter: &ReportFilter) -> GradeReport {
    let population: Vec<&ReportRow> = rows
        .iter()
        .filter(|row| filter.grade.map_or(true, |grade| row.grade_section.grade.key() == Some(grade)))
        .collect();

    let total = population.len();
    let present = population.iter().filter(|row| row.is_present()).count();
    let status_counts = StatusCounts::from_statuses(population.iter().map(|row| row.nutrition_status));

    let section = filter
        .section
        .as_deref()
        .map(normalize_section_name)
        .filter(|section| !section.is_empty());
    let search = filter
        .search
        .as_deref()
        .map(|query| query.trim().to_lowercase())
        .filter(|query| !query.is_empty());

    let listed = population
        .into_iter()
        .filter(|row| section.as_ref().map_or(true, |wanted| row.grade_section.section == *wanted))
        .filter(|row| filter.status.map_or(true, |wanted| wanted.matches(row.nutrition_status)))
        .filter(|row| {
            search.as_ref().map_or(true, |query| {
                row.name.to_lowercase().contains(query.as_str())
                    || row.grade_section.display().to_lowercase().contains(query.as_str())
            })
        })
        .cloned()
        .collect();

    GradeReport {
        total,
        present,
        absent: total - present,
        present_pct: present_percentage(present, total),
        status_counts,
        rows: listed,
    }
}

fn present_percentage(present: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = present as f64 * 100.0 / total as f64;
    (pct * 10.0).round() / 10.0
}

/// Report service over the record store.
pub struct ReportService<S: StudentRepository, B: BmiRepository, A: AttendanceRepository> {
    students: S,
    bmi: B,
    attendance: A,
}

impl<S, B, A> ReportService<S, B, A>
where
    S: StudentRepository,
    B: BmiRepository,
    A: AttendanceRepository,
{
    pub fn new(students: S, bmi: B, attendance: A) -> Self {
        Self {
            students,
            bmi,
            attendance,
        }
    }

    /// Resolved rows for every student with latest BMI and the day's mark.
    pub fn report_rows(&self, date: &str) -> Result<Vec<ReportRow>, ServiceError> {
        let students = self.students.list_students(&StudentListQuery::default())?;
        let history = self.bmi.list_bmi_records()?;
        let latest = latest_records(&history);
        let marks = self.attendance.attendance_for_date(date)?;

        Ok(students
            .iter()
            .map(|student| {
                ReportRow::from_student(
                    student,
                    latest.get(&student.id).map(|record| record.bmi),
                    marks.get(&student.id).copied(),
                )
            })
            .collect())
    }

    /// Report for `date` under `filter`.
    pub fn grade_report(&self, filter: &ReportFilter, date: &str) -> Result<GradeReport, ServiceError> {
        let rows = self.report_rows(date)?;
        let report = build_report(&rows, filter);
        info!(
            "event=grade_report module=service status=ok grade={} date={date} total={} listed={}",
            filter.grade.map_or("all", GradeKey::as_str),
            report.total,
            report.rows.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::{build_report, ReportFilter, ReportRow, StatusCounts, StatusFilter};
    use crate::model::grade::GradeKey;
    use crate::model::nutrition::NutritionStatus;
    use crate::model::student::{AttendanceStatus, StudentRecord};

    fn row(
        name: &str,
        grade: &str,
        section: &str,
        status: Option<NutritionStatus>,
        attendance: Option<AttendanceStatus>,
    ) -> ReportRow {
        let mut student = StudentRecord::new(name, grade, section);
        student.nutrition_status = status;
        ReportRow::from_student(&student, None, attendance)
    }

    fn sample_rows() -> Vec<ReportRow> {
        vec![
            row("Ana Cruz", "3", "ST. JOHN", Some(NutritionStatus::Normal), Some(AttendanceStatus::Present)),
            row("Ben Ramos", "GRADE 3", "st. john", None, Some(AttendanceStatus::Absent)),
            row("Carla Diaz", "3", "ST. PAUL", Some(NutritionStatus::Wasted), Some(AttendanceStatus::Present)),
            row("Dan Lim", "5", "RUBY", Some(NutritionStatus::Obese), None),
        ]
    }

    #[test]
    fn status_counts_track_unknown_and_total() {
        let counts = StatusCounts::from_statuses([
            Some(NutritionStatus::Normal),
            None,
            Some(NutritionStatus::Normal),
            Some(NutritionStatus::Obese),
        ]);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.count(Some(NutritionStatus::Normal)), 2);
        assert_eq!(counts.count(None), 1);
        assert_eq!(counts.count(Some(NutritionStatus::Wasted)), 0);
    }

    #[test]
    fn grade_filter_defines_summary_population() {
        let report = build_report(
            &sample_rows(),
            &ReportFilter {
                grade: Some(GradeKey::Grade3),
                ..ReportFilter::default()
            },
        );
        assert_eq!(report.total, 3);
        assert_eq!(report.present, 2);
        assert_eq!(report.absent, 1);
        assert_eq!(report.present_pct, 66.7);
        assert_eq!(report.status_counts.unknown, 1);
        assert_eq!(report.rows.len(), 3);
    }

    #[test]
    fn section_status_and_search_only_narrow_rows() {
        let rows = sample_rows();
        let report = build_report(
            &rows,
            &ReportFilter {
                grade: Some(GradeKey::Grade3),
                section: Some("St. John".to_string()),
                status: Some(StatusFilter::Missing),
                search: None,
            },
        );
        assert_eq!(report.total, 3);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].name, "Ben Ramos");

        let by_display = build_report(
            &rows,
            &ReportFilter {
                search: Some("grade 5 - ruby".to_string()),
                ..ReportFilter::default()
            },
        );
        assert_eq!(by_display.total, 4);
        assert_eq!(by_display.rows.len(), 1);
        assert_eq!(by_display.rows[0].name, "Dan Lim");

        let by_status = build_report(
            &rows,
            &ReportFilter {
                status: Some(StatusFilter::Is(NutritionStatus::Wasted)),
                ..ReportFilter::default()
            },
        );
        assert_eq!(by_status.rows.len(), 1);
        assert_eq!(by_status.rows[0].name, "Carla Diaz");
    }

    #[test]
    fn empty_population_reports_zero_percent() {
        let report = build_report(
            &sample_rows(),
            &ReportFilter {
                grade: Some(GradeKey::K2),
                ..ReportFilter::default()
            },
        );
        assert_eq!(report.total, 0);
        assert_eq!(report.present_pct, 0.0);
        assert!(report.rows.is_empty());
    }
}
