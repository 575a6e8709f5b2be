//! The Pokemon record collection.

use crate::error::{StorageError, StorageResult};
use pokegen_model::PokemonRecord;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Persistent store for [`PokemonRecord`]s, keyed by `name`.
///
/// `put` upserts; `find_all` returns rows in no particular order (callers
/// impose ordering). Rows are validated on read.
pub struct RecordStore {
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Opens (and migrates) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// An in-memory store, for tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pokemon (
                name TEXT PRIMARY KEY,
                record TEXT NOT NULL
            );",
        )?;
        debug!("record store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Upserts a record under its name.
    pub fn put(&self, record: &PokemonRecord) -> StorageResult<()> {
        let json = serde_json::to_string(record)?;
        let conn = self.conn.lock().expect("record store lock poisoned");
        conn.execute(
            "INSERT INTO pokemon (name, record) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET record = excluded.record",
            params![record.name, json],
        )?;
        Ok(())
    }

    /// Deletes the record with the given name. Deleting a missing record is
    /// a no-op.
    pub fn delete(&self, name: &str) -> StorageResult<()> {
        let conn = self.conn.lock().expect("record store lock poisoned");
        conn.execute("DELETE FROM pokemon WHERE name = ?1", params![name])?;
        Ok(())
    }

    /// Returns all records. Rows failing schema-on-read validation are
    /// skipped with a warning.
    pub fn find_all(&self) -> StorageResult<Vec<PokemonRecord>> {
        let conn = self.conn.lock().expect("record store lock poisoned");
        let mut stmt = conn.prepare("SELECT name, record FROM pokemon")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (name, json) = row?;
            match PokemonRecord::from_json(&json) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping invalid record '{name}': {err}"),
            }
        }
        Ok(records)
    }

    /// Returns the record with the given name, if present and valid.
    pub fn find_one(&self, name: &str) -> StorageResult<Option<PokemonRecord>> {
        let conn = self.conn.lock().expect("record store lock poisoned");
        let json: Option<String> = conn
            .query_row(
                "SELECT record FROM pokemon WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            None => Ok(None),
            Some(json) => PokemonRecord::from_json(&json)
                .map(Some)
                .map_err(|err| StorageError::InvalidRecord {
                    name: name.to_string(),
                    reason: err.to_string(),
                }),
        }
    }

    /// Number of stored records.
    pub fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().expect("record store lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
