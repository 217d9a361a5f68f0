//! The `KeyValueStore` trait and an in-process implementation.
//!
//! Every piece of persistent state (the session identity and each record
//! collection) lives under its own key as a self-contained JSON document.
//! Backends only move strings around; (de)serialisation happens in the
//! layers above.

use std::{
  collections::BTreeMap,
  convert::Infallible,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Storage key of the signed-in identity.
pub const SESSION_KEY: &str = "currentUser";
/// Storage key of the schedule collection.
pub const SCHEDULE_KEY: &str = "subjects";
/// Storage key of the grades collection.
pub const GRADES_KEY: &str = "grades";
/// Storage key of the absences collection.
pub const ABSENCES_KEY: &str = "absences";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a persistent string-to-string map.
///
/// Methods take `&self`: a store is a handle onto shared state, so the auth
/// manager and each collection can hold their own clone of it. Writes to one
/// key never affect another.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value under `key`. Returns `None` if nothing is stored.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Overwrite the value under `key`.
  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Delete the value under `key`. Removing a missing key is not an error.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// A [`KeyValueStore`] held entirely in memory.
///
/// Cloning is cheap and clones share the same map, so a clone behaves like a
/// second execution context reading the same profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Number of keys currently stored.
  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
    // The map is never left half-updated, so a poisoned lock is still usable.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.lock().insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    self.lock().remove(key);
    Ok(())
  }
}
