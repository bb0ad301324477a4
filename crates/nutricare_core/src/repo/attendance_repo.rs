//! Attendance repository contract and SQLite implementation.

use crate::model::nutrition::StudentId;
use crate::model::student::{AttendanceRecord, AttendanceStatus};
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, Connection};
use std::collections::HashMap;

/// Repository interface for daily attendance marks.
pub trait AttendanceRepository {
    /// Inserts or replaces the mark for `(student_id, date)`.
    fn record_attendance(&self, record: &AttendanceRecord) -> RepoResult<()>;
    /// Marks for one day keyed by student.
    fn attendance_for_date(&self, date: &str) -> RepoResult<HashMap<StudentId, AttendanceStatus>>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn record_attendance(&self, record: &AttendanceRecord) -> RepoResult<()> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO attendance (student_id, date, status)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (student_id, date) DO UPDATE SET status = excluded.status;",
            params![
                record.student_id.to_string(),
                record.date.as_str(),
                record.status.label()
            ],
        )?;
        Ok(())
    }

    fn attendance_for_date(&self, date: &str) -> RepoResult<HashMap<StudentId, AttendanceStatus>> {
        let mut stmt = self
            .conn
            .prepare("SELECT student_id, status FROM attendance WHERE date = ?1;")?;
        let mut rows = stmt.query([date])?;
        let mut marks = HashMap::new();

        while let Some(row) = rows.next()? {
            let id_text: String = row.get("student_id")?;
            let status_text: String = row.get("status")?;
            let status = AttendanceStatus::parse_label(&status_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid attendance status `{status_text}` in attendance.status"
                ))
            })?;
            marks.insert(parse_uuid_column(&id_text, "attendance.student_id")?, status);
        }

        Ok(marks)
    }
}
