//! Tests for `SqliteStorage`, alone and underneath the core managers.

use std::path::PathBuf;

use schoolbook_core::{
  auth::AuthManager,
  identity::{Role, StaticDirectory},
  record::{Grade, Record, ScheduleEntry},
  records::RecordStore,
  storage::{GRADES_KEY, KeyValueStore, SCHEDULE_KEY, SESSION_KEY},
};
use uuid::Uuid;

use crate::SqliteStorage;

fn store() -> SqliteStorage { SqliteStorage::open_in_memory().expect("in-memory store") }

/// A database path that does not exist yet; removed again on drop.
struct TempDb(PathBuf);

impl TempDb {
  fn new() -> Self {
    Self(std::env::temp_dir().join(format!("schoolbook-{}", Uuid::new_v4())).join("test.db"))
  }
}

impl Drop for TempDb {
  fn drop(&mut self) {
    if let Some(dir) = self.0.parent() {
      let _ = std::fs::remove_dir_all(dir);
    }
  }
}

// ─── Raw key-value behaviour ─────────────────────────────────────────────────

#[test]
fn get_missing_returns_none() {
  let s = store();
  assert!(s.get("absent").unwrap().is_none());
}

#[test]
fn set_overwrites_whole_value() {
  let s = store();
  s.set(GRADES_KEY, r#"[{"a":1},{"b":2}]"#).unwrap();
  s.set(GRADES_KEY, "[]").unwrap();
  assert_eq!(s.get(GRADES_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn remove_is_idempotent() {
  let s = store();
  s.set(SESSION_KEY, "{}").unwrap();
  s.remove(SESSION_KEY).unwrap();
  s.remove(SESSION_KEY).unwrap();
  assert!(s.get(SESSION_KEY).unwrap().is_none());
}

#[test]
fn clones_share_the_connection() {
  let a = store();
  let b = a.clone();
  a.set(SCHEDULE_KEY, "[]").unwrap();
  assert_eq!(b.get(SCHEDULE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn non_ascii_values_survive() {
  let s = store();
  s.set("k", "Történelem · Csütörtök").unwrap();
  assert_eq!(s.get("k").unwrap().as_deref(), Some("Történelem · Csütörtök"));
}

// ─── Durability across reopen ────────────────────────────────────────────────

#[test]
fn open_creates_parent_directories() {
  let db = TempDb::new();
  SqliteStorage::open(&db.0).unwrap();
  assert!(db.0.exists());
}

#[test]
fn collections_round_trip_across_reopen() {
  let db = TempDb::new();

  let edited = {
    let mut records = RecordStore::load(SqliteStorage::open(&db.0).unwrap());
    let mut entry = records.schedule()[0].clone();
    entry.room = "A-202".into();
    assert!(records.schedule_mut().edit(entry).unwrap());
    assert!(records.grades_mut().delete("1").unwrap());
    records.schedule().to_vec()
  };

  let reopened = RecordStore::load(SqliteStorage::open(&db.0).unwrap());
  assert_eq!(reopened.schedule(), edited.as_slice());
  assert_eq!(reopened.schedule()[0].room, "A-202");
  assert_eq!(reopened.grades().len(), Grade::seed().len() - 1);
}

#[test]
fn seed_is_installed_once() {
  let db = TempDb::new();
  {
    let mut records = RecordStore::load(SqliteStorage::open(&db.0).unwrap());
    records.save_schedule(Vec::new()).unwrap();
  }
  // An empty collection is still a stored collection: no reseeding.
  let reopened = RecordStore::load(SqliteStorage::open(&db.0).unwrap());
  assert!(reopened.schedule().is_empty());
  assert_ne!(ScheduleEntry::seed().len(), 0);
}

#[test]
fn session_persists_across_reopen_until_sign_out() {
  let db = TempDb::new();
  {
    let mut auth =
      AuthManager::new(StaticDirectory::reference(), SqliteStorage::open(&db.0).unwrap());
    let who = auth.sign_in("TanárÚr", "090807").unwrap();
    assert_eq!(who.role, Role::Teacher);
  }

  let mut auth =
    AuthManager::new(StaticDirectory::reference(), SqliteStorage::open(&db.0).unwrap());
  assert_eq!(auth.current().map(|i| i.id.as_str()), Some("1"));
  auth.sign_out().unwrap();

  let auth = AuthManager::new(StaticDirectory::reference(), SqliteStorage::open(&db.0).unwrap());
  assert!(auth.current().is_none());
}
