//! Database repository layer
//!
//! Query and insert operations for logged sets and personal records. The
//! statistics modules never touch this layer; callers fetch rows here and
//! hand plain slices to the engine.

use crate::error::{Error, Result};
use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

/// Filter for fetching log rows.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Restrict to one exercise
    pub exercise_id: Option<String>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
}

impl LogFilter {
    /// Filter for a single exercise over all time.
    pub fn exercise(exercise_id: &str) -> Self {
        Self {
            exercise_id: Some(exercise_id.to_string()),
            ..Default::default()
        }
    }

    /// Filter for a date window across all exercises.
    pub fn window(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            exercise_id: None,
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Database handle with a single pooled connection
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Workout log operations
    // ============================================

    /// Insert a batch of log entries for a user. Returns rows inserted.
    pub fn insert_log_entries(&self, user_id: &str, entries: &[LogEntry]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for entry in entries {
            tx.execute(
                r#"
                INSERT INTO workout_logs
                    (user_id, session_date, workout_type, exercise_id, exercise_name,
                     muscle_group, sets, reps, weight_kg)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    user_id,
                    entry.session_date.to_string(),
                    entry.workout_type.as_str(),
                    entry.exercise_id,
                    entry.exercise_name.as_known(),
                    entry.muscle_group,
                    entry.sets,
                    entry.reps,
                    entry.weight_kg,
                ],
            )?;
        }
        tx.commit()?;

        tracing::debug!(user_id, count = entries.len(), "Inserted log entries");
        Ok(entries.len())
    }

    /// Fetch log entries for a user, optionally restricted by exercise and
    /// date range, in session-date order.
    pub fn fetch_logs(&self, user_id: &str, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().unwrap();

        let mut sql = String::from(
            "SELECT session_date, workout_type, exercise_id, exercise_name,
                    muscle_group, sets, reps, weight_kg
             FROM workout_logs WHERE user_id = ?1",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(exercise_id) = &filter.exercise_id {
            params.push(Box::new(exercise_id.clone()));
            sql.push_str(&format!(" AND exercise_id = ?{}", params.len()));
        }
        if let Some(from) = filter.from {
            params.push(Box::new(from.to_string()));
            sql.push_str(&format!(" AND session_date >= ?{}", params.len()));
        }
        if let Some(to) = filter.to {
            params.push(Box::new(to.to_string()));
            sql.push_str(&format!(" AND session_date <= ?{}", params.len()));
        }
        sql.push_str(" ORDER BY session_date, id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
            Self::row_to_log_entry,
        )?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Distinct session dates for a user, ascending.
    pub fn distinct_session_dates(&self, user_id: &str) -> Result<Vec<NaiveDate>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT session_date FROM workout_logs
             WHERE user_id = ?1 ORDER BY session_date",
        )?;
        let rows = stmt.query_map([user_id], |row| {
            let date_str: String = row.get(0)?;
            Ok(parse_date(&date_str))
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Count of log rows for a user.
    pub fn count_logs(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM workout_logs WHERE user_id = ?1",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    fn row_to_log_entry(row: &Row) -> rusqlite::Result<LogEntry> {
        let date_str: String = row.get("session_date")?;
        let workout_type_str: String = row.get("workout_type")?;
        let name: Option<String> = row.get("exercise_name")?;

        Ok(LogEntry {
            session_date: parse_date(&date_str),
            workout_type: WorkoutType::from_str(&workout_type_str)
                .unwrap_or(WorkoutType::Custom),
            exercise_id: row.get("exercise_id")?,
            exercise_name: ExerciseName::from_optional(name),
            muscle_group: row.get("muscle_group")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight_kg: row.get("weight_kg")?,
        })
    }

    // ============================================
    // Personal record operations
    // ============================================

    /// Insert or replace the record for `(user, exercise, record_type)`.
    ///
    /// Replacement is unconditional: a submission with a worse value still
    /// overwrites the stored record. Last write wins; there is no version
    /// check. Returns the row id of the live record.
    pub fn upsert_personal_record(&self, record: &PersonalRecord) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO personal_records
                (user_id, exercise_id, record_type, weight_kg, reps, sets,
                 total_volume, duration_seconds, achieved_date, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(user_id, exercise_id, record_type) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                reps = excluded.reps,
                sets = excluded.sets,
                total_volume = excluded.total_volume,
                duration_seconds = excluded.duration_seconds,
                achieved_date = excluded.achieved_date,
                notes = excluded.notes,
                created_at = excluded.created_at
            "#,
            params![
                record.user_id,
                record.exercise_id,
                record.record_type.as_str(),
                record.weight_kg,
                record.reps,
                record.sets,
                record.total_volume,
                record.duration_seconds,
                record.achieved_date.to_string(),
                record.notes,
                record.created_at.to_rfc3339(),
            ],
        )?;

        let id = conn.query_row(
            "SELECT id FROM personal_records
             WHERE user_id = ?1 AND exercise_id = ?2 AND record_type = ?3",
            params![
                record.user_id,
                record.exercise_id,
                record.record_type.as_str()
            ],
            |r| r.get(0),
        )?;

        tracing::debug!(
            user_id = record.user_id,
            exercise_id = record.exercise_id,
            record_type = record.record_type.as_str(),
            id,
            "Upserted personal record"
        );
        Ok(id)
    }

    /// List records for a user, most-recently-achieved first. When
    /// `exercise_id` is given, only that exercise's records are returned.
    pub fn list_personal_records(
        &self,
        user_id: &str,
        exercise_id: Option<&str>,
    ) -> Result<Vec<PersonalRecord>> {
        let conn = self.conn.lock().unwrap();

        let records = match exercise_id {
            Some(exercise_id) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM personal_records
                     WHERE user_id = ?1 AND exercise_id = ?2
                     ORDER BY achieved_date DESC, id DESC",
                )?;
                let rows = stmt.query_map([user_id, exercise_id], Self::row_to_record)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM personal_records
                     WHERE user_id = ?1
                     ORDER BY achieved_date DESC, id DESC",
                )?;
                let rows = stmt.query_map([user_id], Self::row_to_record)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(records)
    }

    /// Get a single record by id.
    pub fn get_personal_record(&self, id: i64) -> Result<Option<PersonalRecord>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM personal_records WHERE id = ?",
            [id],
            Self::row_to_record,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Delete a single record by id. Irreversible.
    pub fn delete_personal_record(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM personal_records WHERE id = ?", [id])?;
        if deleted == 0 {
            return Err(Error::RecordNotFound(id));
        }
        tracing::debug!(id, "Deleted personal record");
        Ok(())
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<PersonalRecord> {
        let record_type_str: String = row.get("record_type")?;
        let achieved_str: String = row.get("achieved_date")?;
        let created_str: String = row.get("created_at")?;

        Ok(PersonalRecord {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            exercise_id: row.get("exercise_id")?,
            record_type: RecordType::from_str(&record_type_str)
                .unwrap_or(RecordType::OneRepMax),
            weight_kg: row.get("weight_kg")?,
            reps: row.get("reps")?,
            sets: row.get("sets")?,
            total_volume: row.get("total_volume")?,
            duration_seconds: row.get("duration_seconds")?,
            achieved_date: parse_date(&achieved_str),
            notes: row.get("notes")?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}
