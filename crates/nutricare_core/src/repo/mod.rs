//! Repository contracts and SQLite implementations for the record store.
//!
//! # Responsibility
//! - Define use-case oriented access to students, BMI records and attendance.
//! - Keep SQL details out of the services.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it, except
//!   the placeholder status labels `Unknown` and `-`, which read as "no
//!   status". The status listing used by recalculation also reads
//!   unrecognized labels as "no status" and logs them.

use crate::db::DbError;
use crate::model::nutrition::NutritionStatus;
use crate::model::student::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod attendance_repo;
pub mod bmi_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every record collection.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid_column(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_status_column(
    value: Option<String>,
    column: &str,
) -> RepoResult<Option<NutritionStatus>> {
    let Some(text) = value else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("unknown") {
        return Ok(None);
    }
    NutritionStatus::parse_label(trimmed)
        .map(Some)
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid nutrition status `{text}` in {column}"))
        })
}

pub(crate) fn status_to_db(status: Option<NutritionStatus>) -> Option<&'static str> {
    status.map(NutritionStatus::label)
}
