//! SQLite rotation backend.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;
use rusqlite::{Connection, OptionalExtension};

use crate::error::PersistenceError;
use crate::rotation::PersistenceBackend;

/// Durable rotation flags in a SQLite database.
///
/// The default database lives in the user's data directory:
/// - Linux: `~/.local/share/aerial-catalog/rotation.db`
/// - macOS: `~/Library/Application Support/aerial-catalog/rotation.db`
/// - Windows: `%APPDATA%\aerial-catalog\rotation.db`
///
/// Each write commits durably on its own, so `flush` is a no-op: a row is
/// either fully upserted or untouched, never half-written.
pub struct SqliteBackend {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteBackend {
    /// Open (or create) the database at the default location.
    pub fn new() -> Result<Self, PersistenceError> {
        Self::open(Self::default_db_path()?)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let db_path = db_path.into();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        let backend = SqliteBackend { conn, db_path };
        backend.init_schema()?;

        debug!("rotation database initialized at {}", backend.db_path.display());
        Ok(backend)
    }

    fn default_db_path() -> Result<PathBuf, PersistenceError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                PersistenceError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    "could not determine user data directory",
                ))
            })?;
        path.push("aerial-catalog");
        path.push("rotation.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<(), PersistenceError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS rotation (
                video_id        TEXT PRIMARY KEY,
                in_rotation     INTEGER NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Number of persisted rotation flags.
    pub fn entry_count(&self) -> Result<i64, PersistenceError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM rotation", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl PersistenceBackend for SqliteBackend {
    fn get(&self, id: &str) -> Result<Option<bool>, PersistenceError> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT in_rotation FROM rotation WHERE video_id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(|v| v != 0))
    }

    fn set(&mut self, id: &str, in_rotation: bool) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT INTO rotation (video_id, in_rotation, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(video_id) DO UPDATE SET
                in_rotation = excluded.in_rotation,
                updated_at = excluded.updated_at",
            rusqlite::params![id, in_rotation, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        // Statements above commit individually; nothing buffered here.
        Ok(())
    }
}

// Connection is not Debug; keep error messages useful anyway.
impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, SqliteBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = SqliteBackend::open(dir.path().join("rotation.db")).unwrap();
        (dir, backend)
    }

    #[test]
    fn unknown_id_reads_back_as_none() {
        let (_dir, backend) = open_temp();
        assert_eq!(backend.get("unknown").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, mut backend) = open_temp();
        backend.set("clip-1", true).unwrap();
        backend.set("clip-2", false).unwrap();

        assert_eq!(backend.get("clip-1").unwrap(), Some(true));
        assert_eq!(backend.get("clip-2").unwrap(), Some(false));
        assert_eq!(backend.entry_count().unwrap(), 2);
    }

    #[test]
    fn set_overwrites_in_place() {
        let (_dir, mut backend) = open_temp();
        backend.set("clip", true).unwrap();
        backend.set("clip", false).unwrap();

        assert_eq!(backend.get("clip").unwrap(), Some(false));
        assert_eq!(backend.entry_count().unwrap(), 1);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rotation.db");

        let mut backend = SqliteBackend::open(&db_path).unwrap();
        backend.set("clip", false).unwrap();
        backend.flush().unwrap();
        drop(backend);

        let reopened = SqliteBackend::open(&db_path).unwrap();
        assert_eq!(reopened.get("clip").unwrap(), Some(false));
    }
}
