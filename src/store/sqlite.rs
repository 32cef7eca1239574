//! Key-value table inside a single SQLite file
//!
//! # Invariants
//! - The `kv_store` table exists once `open` returns.
//! - `set_item` is a single upsert statement, so a value is replaced atomically.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, error};
use rusqlite::{Connection, OptionalExtension};

use super::Storage;
use crate::error::StoreError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

pub(crate) struct SqliteStorage {
    conn: Connection,
    location: String,
}

impl SqliteStorage {
    /// Open (creating if needed) the database at `path`.
    pub(crate) fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let started_at = Instant::now();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let conn = match Connection::open(path).and_then(|conn| {
            bootstrap_connection(&conn)?;
            Ok(conn)
        }) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open status=error path={} duration_ms={} error={}",
                    path.display(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };
        debug!(
            "event=db_open status=ok path={} duration_ms={}",
            path.display(),
            started_at.elapsed().as_millis()
        );
        Ok(Self {
            conn,
            location: path.display().to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        bootstrap_connection(&conn)?;
        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }
}

fn bootstrap_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA)
}

/// `<data_dir>/tallybook.db`
pub(crate) fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(format!("{}.db", crate::consts::APP_NAME))
}

impl Storage for SqliteStorage {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}
