use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(1, SCHEMA_V1)];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, i64>(0)
    })
    .unwrap_or(0)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

const SCHEMA_V1: &str = "
CREATE TABLE schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
INSERT INTO schema_version (version) VALUES (1);

CREATE TABLE profiles (
    id TEXT PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    blood_group TEXT,
    date_of_birth TEXT,
    chronic_conditions TEXT NOT NULL DEFAULT '[]',
    allergies TEXT NOT NULL DEFAULT '[]',
    api_token_hash TEXT
);

CREATE TABLE health_logs (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id),
    log_date TEXT NOT NULL,
    temperature REAL,
    blood_pressure_systolic INTEGER,
    blood_pressure_diastolic INTEGER,
    heart_rate INTEGER,
    oxygen_saturation REAL,
    weight REAL,
    blood_sugar REAL,
    has_fever INTEGER NOT NULL DEFAULT 0,
    has_cough INTEGER NOT NULL DEFAULT 0,
    has_headache INTEGER NOT NULL DEFAULT 0,
    has_fatigue INTEGER NOT NULL DEFAULT 0,
    has_body_pain INTEGER NOT NULL DEFAULT 0,
    has_nausea INTEGER NOT NULL DEFAULT 0,
    pain_level TEXT NOT NULL DEFAULT 'none',
    symptom_severity TEXT NOT NULL DEFAULT 'none',
    mood TEXT NOT NULL DEFAULT 'okay',
    stress_level INTEGER NOT NULL DEFAULT 5,
    anxiety_level INTEGER NOT NULL DEFAULT 5,
    sleep_hours REAL,
    sleep_quality INTEGER NOT NULL DEFAULT 5,
    water_intake REAL,
    exercise_minutes INTEGER,
    medications_taken TEXT NOT NULL DEFAULT '[]',
    notes TEXT,
    symptoms_description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX idx_health_logs_user_date ON health_logs(user_id, log_date DESC);

CREATE TABLE health_reports (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id),
    report_date TEXT NOT NULL,
    report_type TEXT NOT NULL DEFAULT 'other',
    title TEXT NOT NULL,
    doctor_name TEXT,
    notes TEXT
);
CREATE INDEX idx_health_reports_user_date ON health_reports(user_id, report_date DESC);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // profiles + health_logs + health_reports + schema_version
        let count = count_tables(&conn).unwrap();
        assert_eq!(count, 4, "Expected 4 tables, got {count}");
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = open_memory_database().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_current_version(&conn), 1);
    }

    #[test]
    fn file_database_opens_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("vitalog.db");
        {
            let conn = open_database(&path).unwrap();
            conn.execute(
                "INSERT INTO profiles (id, full_name, email) VALUES ('u1', 'Test', 't@example.com')",
                [],
            )
            .unwrap();
        }
        let conn = open_database(&path).unwrap();
        let name: String = conn
            .query_row("SELECT full_name FROM profiles WHERE id='u1'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name, "Test");
    }
}
