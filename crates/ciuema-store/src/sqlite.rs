use std::path::Path;
use std::sync::Mutex;

use ciuema_core::error::CiuemaError;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{migration, DataStore};

/// Key-value store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        migration::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        migration::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, CiuemaError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CiuemaError::Database(e.to_string()))?;
        f(&conn).map_err(|e| CiuemaError::Database(e.to_string()))
    }
}

impl DataStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError> {
        tracing::debug!(key, "reading entry");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CiuemaError> {
        tracing::debug!(key, bytes = value.len(), "writing entry");
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv_entries (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))",
                params![key, value],
            )
        })?;
        Ok(())
    }
}
