//! BMI record repository contract and SQLite implementation.
//!
//! # Invariants
//! - Stored BMI values are finite.
//! - A status update writes the BMI record and its owning student together,
//!   so a repeated recalculation over unchanged data plans nothing.

use crate::classify::StatusUpdate;
use crate::model::nutrition::{BmiRecord, BmiRecordId, StudentId};
use crate::model::student::ValidationError;
use crate::repo::{parse_status_column, parse_uuid_column, status_to_db, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const BMI_SELECT_SQL: &str = "SELECT
    id,
    student_id,
    bmi,
    recorded_at,
    nutrition_status
FROM bmi_records";

/// Repository interface for BMI measurements.
pub trait BmiRepository {
    fn create_bmi_record(&self, record: &BmiRecord) -> RepoResult<BmiRecordId>;
    /// Full history ordered by `recorded_at DESC, id ASC`.
    fn list_bmi_records(&self) -> RepoResult<Vec<BmiRecord>>;
    fn list_bmi_records_for_student(&self, student_id: StudentId) -> RepoResult<Vec<BmiRecord>>;
    /// Persists one recalculated status. Each call is independent.
    fn apply_status_update(&self, update: &StatusUpdate) -> RepoResult<()>;
}

/// SQLite-backed BMI repository.
pub struct SqliteBmiRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBmiRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_records(&self, sql: &str, student_id: Option<StudentId>) -> RepoResult<Vec<BmiRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match student_id {
            Some(id) => stmt.query([id.to_string()])?,
            None => stmt.query([])?,
        };
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_bmi_row(row)?);
        }
        Ok(records)
    }
}

impl BmiRepository for SqliteBmiRepository<'_> {
    fn create_bmi_record(&self, record: &BmiRecord) -> RepoResult<BmiRecordId> {
        if !record.bmi.is_finite() {
            return Err(ValidationError::NonFiniteBmi.into());
        }

        self.conn.execute(
            "INSERT INTO bmi_records (
                id,
                student_id,
                bmi,
                recorded_at,
                nutrition_status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                record.id.to_string(),
                record.student_id.to_string(),
                record.bmi,
                record.recorded_at,
                status_to_db(record.nutrition_status),
            ],
        )?;

        Ok(record.id)
    }

    fn list_bmi_records(&self) -> RepoResult<Vec<BmiRecord>> {
        self.query_records(
            &format!("{BMI_SELECT_SQL} ORDER BY recorded_at DESC, id ASC;"),
            None,
        )
    }

    fn list_bmi_records_for_student(&self, student_id: StudentId) -> RepoResult<Vec<BmiRecord>> {
        self.query_records(
            &format!("{BMI_SELECT_SQL} WHERE student_id = ?1 ORDER BY recorded_at DESC, id ASC;"),
            Some(student_id),
        )
    }

    fn apply_status_update(&self, update: &StatusUpdate) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let label = update.status.label();

        let changed = tx.execute(
            "UPDATE bmi_records
             SET
                nutrition_status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2 AND student_id = ?3;",
            params![
                label,
                update.record_id.to_string(),
                update.student_id.to_string()
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "bmi record",
                id: update.record_id,
            });
        }

        let changed = tx.execute(
            "UPDATE students
             SET
                nutrition_status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![label, update.student_id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "student",
                id: update.student_id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_bmi_row(row: &Row<'_>) -> RepoResult<BmiRecord> {
    let id_text: String = row.get("id")?;
    let student_text: String = row.get("student_id")?;
    let bmi: f64 = row.get("bmi")?;
    if !bmi.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "non-finite bmi `{bmi}` in bmi_records.bmi"
        )));
    }

    Ok(BmiRecord {
        id: parse_uuid_column(&id_text, "bmi_records.id")?,
        student_id: parse_uuid_column(&student_text, "bmi_records.student_id")?,
        bmi,
        recorded_at: row.get("recorded_at")?,
        nutrition_status: parse_status_column(
            row.get("nutrition_status")?,
            "bmi_records.nutrition_status",
        )?,
    })
}
