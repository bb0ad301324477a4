//! Core domain logic for NutriCare.
//! Grade/section resolution and nutrition status classification live here,
//! together with the record store and the services built on them.

pub mod cache;
pub mod classify;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resolve;
pub mod service;

pub use cache::SnapshotCache;
pub use classify::{classify, latest_records, recalculate, RecalcPlan, StatusUpdate, StudentStatus};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::grade::{GradeKey, GradeSection, ResolvedGrade, UNKNOWN_SENTINEL};
pub use model::nutrition::{BmiRecord, BmiRecordId, NutritionStatus, StudentId};
pub use model::student::{AttendanceRecord, AttendanceStatus, StudentRecord, ValidationError};
pub use repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
pub use repo::bmi_repo::{BmiRepository, SqliteBmiRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use resolve::{
    find_grade_for_section, infer_grade_from_raw, names_loose_match, normalize_grade_section,
    normalize_section_name, parse_grade_prefix, resolve_student_fields,
};
pub use service::nutrition_service::{ApplyOptions, NutritionService, RecalcReport};
pub use service::reconcile::{reconcile, ImportedRow, Reconciliation};
pub use service::report_service::{build_report, GradeReport, ReportFilter, ReportService};
pub use service::ServiceError;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
