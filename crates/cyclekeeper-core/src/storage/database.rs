//! SQLite-backed cycle history.
//!
//! The in-memory [`CycleStore`] lives for one session; this database keeps
//! the history between sessions. Rows come back in insertion order so a
//! reloaded store predicts exactly what the original session would have.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::migrations;
use crate::cycle::{format_date, parse_date, Cycle, CycleStore, Flow};
use crate::error::{DatabaseError, ValidationError};

/// A persisted cycle with its row metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRow {
    pub id: i64,
    #[serde(flatten)]
    pub cycle: Cycle,
    pub recorded_at: DateTime<Utc>,
}

/// SQLite database for cycle history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        debug!(path = %path.display(), "history database opened");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::migrate(&self.conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Append a cycle to the history.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_cycle(&self, cycle: &Cycle) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO cycles (start_date, end_date, flow, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                format_date(cycle.start()),
                format_date(cycle.end()),
                cycle.flow().as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All persisted cycles in insertion order.
    pub fn cycles(&self) -> Result<Vec<CycleRow>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_date, end_date, flow, recorded_at
             FROM cycles
             ORDER BY id",
        )?;
        let raw = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut rows = Vec::new();
        for r in raw {
            let (id, start, end, flow, recorded_at) = r?;
            let corrupt = |message: String| DatabaseError::CorruptRow { id, message };

            let cycle = decode_cycle(&start, &end, &flow).map_err(|e| corrupt(e.to_string()))?;
            let recorded_at = DateTime::parse_from_rfc3339(&recorded_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| corrupt(e.to_string()))?;

            rows.push(CycleRow {
                id,
                cycle,
                recorded_at,
            });
        }
        Ok(rows)
    }

    /// Rebuild an in-memory store from the persisted history.
    pub fn load_store(&self) -> Result<CycleStore, DatabaseError> {
        let cycles: Vec<Cycle> = self.cycles()?.into_iter().map(|r| r.cycle).collect();
        debug!(count = cycles.len(), "history loaded");
        Ok(CycleStore::from_cycles(cycles))
    }

    pub fn count(&self) -> Result<u64, DatabaseError> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM cycles", [], |row| row.get::<_, u64>(0))?;
        Ok(n)
    }
}

fn decode_cycle(start: &str, end: &str, flow: &str) -> Result<Cycle, ValidationError> {
    let flow: Flow = flow.parse()?;
    Cycle::new(parse_date("start", start)?, parse_date("end", end)?, flow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(start: &str, end: &str, flow: Flow) -> Cycle {
        Cycle::parse(start, end, flow).unwrap()
    }

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let c = cycle("2024-01-01", "2024-01-05", Flow::Heavy);
        let id = db.record_cycle(&c).unwrap();

        let rows = db.cycles().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].cycle, c);
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn load_store_preserves_insertion_order() {
        let db = Database::open_memory().unwrap();
        let late = cycle("2024-03-01", "2024-03-05", Flow::Light);
        let early = cycle("2024-01-01", "2024-01-05", Flow::Medium);
        db.record_cycle(&late).unwrap();
        db.record_cycle(&early).unwrap();
        db.record_cycle(&late).unwrap();

        let store = db.load_store().unwrap();
        assert_eq!(store.history(), &[late, early, late]);
    }

    #[test]
    fn corrupt_row_is_reported_with_id() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO cycles (start_date, end_date, flow, recorded_at)
                 VALUES ('2024-01-01', '2024-01-05', 'torrential', ?1)",
                params![Utc::now().to_rfc3339()],
            )
            .unwrap();
        let err = db.cycles().unwrap_err();
        assert!(matches!(err, DatabaseError::CorruptRow { id: 1, .. }));
    }

    #[test]
    fn row_serializes_flat() {
        let row = CycleRow {
            id: 7,
            cycle: cycle("2024-01-01", "2024-01-05", Flow::Light),
            recorded_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(json["end"], "2024-01-05");
        assert_eq!(json["flow"], "light");
    }

    #[test]
    fn file_backed_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclekeeper.db");
        {
            let db = Database::open(&path).unwrap();
            db.record_cycle(&cycle("2024-01-01", "2024-01-05", Flow::Light))
                .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }
}
