//! A persisted, wholesale-replaced collection of records.
//!
//! Storage only ever sees complete collections. Create, edit and delete are
//! expressed as pure functions producing the *next* collection, which is then
//! handed to [`Collection::save`].

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  error::{Error, Result},
  record::Record,
  storage::KeyValueStore,
};

// ─── Next-state helpers ──────────────────────────────────────────────────────

/// An id not used by any record in `records`.
pub fn fresh_id<T: Record>(records: &[T]) -> String {
  loop {
    let id = Uuid::new_v4().to_string();
    if !records.iter().any(|r| r.id() == id) {
      return id;
    }
  }
}

/// `records` with `record` appended.
pub fn appended<T: Record>(records: &[T], record: T) -> Vec<T> {
  let mut next = records.to_vec();
  next.push(record);
  next
}

/// `records` with every record sharing `record`'s id replaced by it.
/// Unchanged if no record has that id.
pub fn replaced<T: Record>(records: &[T], record: &T) -> Vec<T> {
  records
    .iter()
    .map(|r| if r.id() == record.id() { record.clone() } else { r.clone() })
    .collect()
}

/// `records` without the record(s) whose id is `id`.
pub fn without<T: Record>(records: &[T], id: &str) -> Vec<T> {
  records.iter().filter(|r| r.id() != id).cloned().collect()
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// One record collection bound to the storage it is persisted in.
#[derive(Debug, Clone)]
pub struct Collection<T, S> {
  storage: S,
  records: Vec<T>,
}

impl<T: Record, S: KeyValueStore> Collection<T, S> {
  /// Read the collection from `storage`.
  ///
  /// Missing or unparseable payloads are replaced by [`Record::seed`], which
  /// is persisted immediately. If storage cannot be read at all the seed set
  /// is used for this session only, leaving whatever is stored untouched.
  pub fn load(storage: S) -> Self {
    let key = T::STORAGE_KEY;

    match storage.get(key) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(records) => {
          debug!(key, count = records.len(), "loaded collection");
          return Self { storage, records };
        }
        Err(e) => {
          warn!(key, error = %e, "stored collection is unreadable; reinstalling seed set");
        }
      },
      Ok(None) => debug!(key, "no stored collection; installing seed set"),
      Err(e) => {
        warn!(key, error = %e, "storage read failed; using seed set without persisting");
        return Self { storage, records: T::seed() };
      }
    }

    let mut collection = Self { storage, records: Vec::new() };
    if let Err(e) = collection.save(T::seed()) {
      warn!(key, error = %e, "could not persist seed set");
      collection.records = T::seed();
    }
    collection
  }

  /// Current records, in stored order.
  pub fn records(&self) -> &[T] { &self.records }

  pub fn get(&self, id: &str) -> Option<&T> {
    self.records.iter().find(|r| r.id() == id)
  }

  /// Replace the stored collection and the in-memory state with `next`.
  ///
  /// On a storage failure the in-memory state is left as it was, so it keeps
  /// matching what is actually persisted.
  pub fn save(&mut self, next: Vec<T>) -> Result<()> {
    let key = T::STORAGE_KEY;
    let payload = serde_json::to_string(&next)?;

    if let Err(e) = self.storage.set(key, &payload) {
      warn!(key, error = %e, "failed to write collection");
      return Err(Error::storage(e));
    }

    debug!(key, count = next.len(), "saved collection");
    self.records = next;
    Ok(())
  }

  /// Append a record built from `draft` under a new unique id.
  pub fn create(&mut self, draft: T::Draft) -> Result<T> {
    let record = T::from_draft(fresh_id(&self.records), draft);
    self.save(appended(&self.records, record.clone()))?;
    Ok(record)
  }

  /// Replace the record with `record`'s id. Returns `false` (and writes
  /// nothing) if there is no such record.
  pub fn edit(&mut self, record: T) -> Result<bool> {
    if self.get(record.id()).is_none() {
      return Ok(false);
    }
    self.save(replaced(&self.records, &record))?;
    Ok(true)
  }

  /// Remove the record with `id`. Returns `false` (and writes nothing) if
  /// there is no such record.
  pub fn delete(&mut self, id: &str) -> Result<bool> {
    if self.get(id).is_none() {
      return Ok(false);
    }
    self.save(without(&self.records, id))?;
    Ok(true)
  }
}
