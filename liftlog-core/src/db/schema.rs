//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: workout logs and personal records
    r#"
    -- ============================================
    -- Logged sets (the engine's input rows)
    -- ============================================

    CREATE TABLE IF NOT EXISTS workout_logs (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id          TEXT NOT NULL,
        session_date     TEXT NOT NULL,      -- ISO-8601 calendar date
        workout_type     TEXT NOT NULL,      -- 'push', 'pull', 'legs', ...
        exercise_id      TEXT NOT NULL,
        exercise_name    TEXT,               -- NULL = unknown exercise
        muscle_group     TEXT,
        sets             INTEGER NOT NULL,
        reps             INTEGER NOT NULL,
        weight_kg        REAL NOT NULL       -- 0 denotes bodyweight
    );

    CREATE INDEX IF NOT EXISTS idx_logs_user_date ON workout_logs(user_id, session_date);
    CREATE INDEX IF NOT EXISTS idx_logs_user_exercise ON workout_logs(user_id, exercise_id);

    -- ============================================
    -- Personal records (durable, upsert-by-key)
    -- ============================================

    CREATE TABLE IF NOT EXISTS personal_records (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id          TEXT NOT NULL,
        exercise_id      TEXT NOT NULL,
        record_type      TEXT NOT NULL,      -- 'one_rep_max', 'max_volume', ...
        weight_kg        REAL,
        reps             INTEGER,
        sets             INTEGER,
        total_volume     REAL,               -- computed at submission for max_volume
        duration_seconds INTEGER,
        achieved_date    TEXT NOT NULL,
        notes            TEXT,
        created_at       TEXT NOT NULL,

        -- At most one live record per key
        UNIQUE(user_id, exercise_id, record_type)
    );

    CREATE INDEX IF NOT EXISTS idx_records_user_exercise
        ON personal_records(user_id, exercise_id);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["workout_logs", "personal_records"] {
            let exists: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                    [table],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "Table {} should exist", table);
        }
    }

    #[test]
    fn test_record_key_unique() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let insert = "INSERT INTO personal_records
            (user_id, exercise_id, record_type, weight_kg, reps, achieved_date, created_at)
            VALUES ('u1', 'bench', 'one_rep_max', 100.0, 1, '2024-01-01', '2024-01-01T00:00:00Z')";
        conn.execute(insert, []).unwrap();
        assert!(conn.execute(insert, []).is_err());
    }
}
