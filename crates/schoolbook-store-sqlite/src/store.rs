//! [`SqliteStorage`]: the SQLite implementation of [`KeyValueStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex, MutexGuard},
};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _};
use schoolbook_core::storage::KeyValueStore;
use tracing::debug;

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Persistent key-value storage backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted, so the auth
/// manager and every collection can share one database.
#[derive(Clone)]
pub struct SqliteStorage {
  conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    debug!(path = %path.display(), "opening sqlite storage");
    Self::init(Connection::open(path)?)
  }

  /// Open an in-memory store, mostly for tests.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| Error::Poisoned)
  }
}

// ─── KeyValueStore impl ──────────────────────────────────────────────────────

impl KeyValueStore for SqliteStorage {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let conn = self.lock()?;
    let value = conn
      .query_row(
        "SELECT value FROM entries WHERE key = ?1",
        rusqlite::params![key],
        |row| row.get(0),
      )
      .optional()?;
    Ok(value)
  }

  /// A single upsert statement, so the previous value is either fully
  /// replaced or left intact.
  fn set(&self, key: &str, value: &str) -> Result<()> {
    let updated_at = Utc::now().to_rfc3339();
    let conn = self.lock()?;
    conn.execute(
      "INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE
         SET value = excluded.value, updated_at = excluded.updated_at",
      rusqlite::params![key, value, updated_at],
    )?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    let conn = self.lock()?;
    conn.execute("DELETE FROM entries WHERE key = ?1", rusqlite::params![key])?;
    Ok(())
  }
}
