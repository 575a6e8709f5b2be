//! Persisted user preferences.

use crate::error::StorageResult;
use pokegen_types::{FacingMode, Theme};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

/// Preference key for the UI theme.
pub const THEME_KEY: &str = "theme";

/// Preference key for the preferred camera facing mode.
pub const FACING_MODE_KEY: &str = "preferred_facing_mode";

/// String key/value store for the two user preferences.
///
/// An absent theme means "auto"; an absent or unrecognized facing mode
/// falls back to [`FacingMode::User`].
pub struct PreferenceStore {
    conn: Mutex<Connection>,
}

impl PreferenceStore {
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
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Raw get.
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn.lock().expect("preference store lock poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Raw upsert.
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.conn.lock().expect("preference store lock poisoned");
        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Raw delete.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let conn = self.conn.lock().expect("preference store lock poisoned");
        conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// The stored theme, or `None` for auto.
    pub fn theme(&self) -> StorageResult<Option<Theme>> {
        Ok(self.get(THEME_KEY)?.and_then(|value| value.parse().ok()))
    }

    /// Stores the theme, or clears it for auto.
    pub fn set_theme(&self, theme: Option<Theme>) -> StorageResult<()> {
        match theme {
            Some(theme) => self.set(THEME_KEY, theme.as_str()),
            None => self.remove(THEME_KEY),
        }
    }

    /// The preferred facing mode, defaulting to [`FacingMode::User`].
    pub fn facing_mode(&self) -> StorageResult<FacingMode> {
        Ok(self
            .get(FACING_MODE_KEY)?
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }

    /// Stores the preferred facing mode.
    pub fn set_facing_mode(&self, mode: FacingMode) -> StorageResult<()> {
        self.set(FACING_MODE_KEY, mode.as_str())
    }
}
