//! Student repository contract and SQLite implementation.

use crate::classify::StudentStatus;
use crate::model::nutrition::StudentId;
use crate::model::student::StudentRecord;
use crate::repo::{parse_status_column, parse_uuid_column, status_to_db, RepoError, RepoResult};
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    grade_level,
    section,
    sex,
    nutrition_status
FROM students";

/// Filters for listing and counting students.
///
/// Grade and section compare against the raw stored columns; `None` means
/// "all".
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub grade_level: Option<String>,
    pub section: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for student rows.
pub trait StudentRepository {
    fn create_student(&self, student: &StudentRecord) -> RepoResult<StudentId>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>>;
    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<StudentRecord>>;
    fn count_students(&self, query: &StudentListQuery) -> RepoResult<u64>;
    /// Current status of every student, in stable id order. Unrecognized
    /// stored labels read as no status.
    fn list_student_statuses(&self) -> RepoResult<Vec<StudentStatus>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, student: &StudentRecord) -> RepoResult<StudentId> {
        student.validate()?;

        self.conn.execute(
            "INSERT INTO students (
                id,
                name,
                grade_level,
                section,
                sex,
                nutrition_status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                student.id.to_string(),
                student.name.trim(),
                student.grade_level.as_str(),
                student.section.as_str(),
                student.sex.as_str(),
                status_to_db(student.nutrition_status),
            ],
        )?;

        Ok(student.id)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn list_students(&self, query: &StudentListQuery) -> RepoResult<Vec<StudentRecord>> {
        let (where_sql, mut bind_values) = filter_clause(query);
        let mut sql = format!("{STUDENT_SELECT_SQL}{where_sql} ORDER BY name COLLATE NOCASE ASC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn count_students(&self, query: &StudentListQuery) -> RepoResult<u64> {
        let (where_sql, bind_values) = filter_clause(query);
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM students{where_sql};"),
            params_from_iter(bind_values),
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative student count `{count}`")))
    }

    fn list_student_statuses(&self) -> RepoResult<Vec<StudentStatus>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, nutrition_status FROM students ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let student_id = parse_uuid_column(&id_text, "students.id")?;
            // Unreadable labels are overwritten by recalculation.
            let nutrition_status = match parse_status_column(
                row.get("nutrition_status")?,
                "students.nutrition_status",
            ) {
                Ok(status) => status,
                Err(RepoError::InvalidData(message)) => {
                    warn!(
                        "event=student_status module=repo status=error student={student_id} error={message}"
                    );
                    None
                }
                Err(err) => return Err(err),
            };
            statuses.push(StudentStatus {
                student_id,
                nutrition_status,
            });
        }
        Ok(statuses)
    }
}

fn filter_clause(query: &StudentListQuery) -> (String, Vec<Value>) {
    let mut sql = String::from(" WHERE 1 = 1");
    let mut bind_values = Vec::new();

    if let Some(grade_level) = query.grade_level.as_deref() {
        sql.push_str(" AND grade_level = ?");
        bind_values.push(Value::Text(grade_level.to_string()));
    }
    if let Some(section) = query.section.as_deref() {
        sql.push_str(" AND section = ?");
        bind_values.push(Value::Text(section.to_string()));
    }

    (sql, bind_values)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<StudentRecord> {
    let id_text: String = row.get("id")?;
    let student = StudentRecord {
        id: parse_uuid_column(&id_text, "students.id")?,
        name: row.get("name")?,
        grade_level: row.get("grade_level")?,
        section: row.get("section")?,
        sex: row.get("sex")?,
        nutrition_status: parse_status_column(
            row.get("nutrition_status")?,
            "students.nutrition_status",
        )?,
    };
    student.validate()?;
    Ok(student)
}
