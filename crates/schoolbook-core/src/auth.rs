//! [`AuthManager`]: sign-in, sign-out and session restore.
//!
//! The manager is an explicit handle over a verifier and a storage backend.
//! Two managers over clones of the same storage behave like two page loads
//! of the same profile: whatever one persists, the other restores.

use tracing::{debug, info, warn};

use crate::{
  error::{Error, Result},
  identity::{CredentialVerifier, Identity},
  storage::{KeyValueStore, SESSION_KEY},
};

pub struct AuthManager<V, S> {
  verifier: V,
  storage:  S,
  current:  Option<Identity>,
}

impl<V: CredentialVerifier, S: KeyValueStore> AuthManager<V, S> {
  /// Build a manager and restore any session persisted in `storage`.
  pub fn new(verifier: V, storage: S) -> Self {
    let mut manager = Self { verifier, storage, current: None };
    manager.current = manager.restore_session();
    manager
  }

  /// Read the persisted identity, if any. Sessions never expire.
  ///
  /// An unreadable payload (or a storage read failure) counts as signed out.
  pub fn restore_session(&self) -> Option<Identity> {
    let raw = match self.storage.get(SESSION_KEY) {
      Ok(raw) => raw?,
      Err(e) => {
        warn!(error = %e, "could not read session; treating as signed out");
        return None;
      }
    };

    match serde_json::from_str::<Identity>(&raw) {
      Ok(identity) => {
        debug!(user = %identity.username, "restored session");
        Some(identity)
      }
      Err(e) => {
        warn!(error = %e, "stored session is unreadable; treating as signed out");
        None
      }
    }
  }

  /// The signed-in identity, or `None` when signed out.
  pub fn current(&self) -> Option<&Identity> { self.current.as_ref() }

  /// Verify the credentials and, on success, persist and return the identity.
  ///
  /// Every mismatch yields [`Error::AuthenticationFailed`] and leaves both the
  /// stored and in-memory session untouched.
  pub fn sign_in(&mut self, username: &str, password: &str) -> Result<&Identity> {
    let Some(identity) = self.verifier.verify(username, password) else {
      debug!("sign-in rejected");
      return Err(Error::AuthenticationFailed);
    };

    let payload = serde_json::to_string(&identity)?;
    self.storage.set(SESSION_KEY, &payload).map_err(Error::storage)?;

    info!(user = %identity.username, role = %identity.role, "signed in");
    Ok(self.current.insert(identity))
  }

  /// Forget the session. Succeeds whether or not anyone was signed in.
  ///
  /// The in-memory session is cleared even when the stored one cannot be
  /// removed; that failure is still returned.
  pub fn sign_out(&mut self) -> Result<()> {
    let previous = self.current.take();
    self.storage.remove(SESSION_KEY).map_err(Error::storage)?;
    if let Some(identity) = previous {
      info!(user = %identity.username, "signed out");
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    identity::{Role, StaticDirectory},
    storage::MemoryStore,
  };

  fn manager(storage: &MemoryStore) -> AuthManager<StaticDirectory, MemoryStore> {
    AuthManager::new(StaticDirectory::reference(), storage.clone())
  }

  #[test]
  fn starts_signed_out_on_empty_storage() {
    let storage = MemoryStore::new();
    let auth = manager(&storage);
    assert!(auth.current().is_none());
    assert!(auth.restore_session().is_none());
  }

  #[test]
  fn failures_are_uniform_and_side_effect_free() {
    let storage = MemoryStore::new();
    let mut auth = manager(&storage);

    let wrong_password = auth.sign_in("TanárÚr", "wrongpassword").unwrap_err();
    let unknown_user = auth.sign_in("nouser", "anything").unwrap_err();

    assert!(matches!(wrong_password, Error::AuthenticationFailed));
    assert!(matches!(unknown_user, Error::AuthenticationFailed));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());

    assert!(auth.current().is_none());
    assert!(storage.is_empty());
  }

  #[test]
  fn session_survives_new_context_until_sign_out() {
    let storage = MemoryStore::new();

    let mut first = manager(&storage);
    let who = first.sign_in("TanárÚr", "090807").unwrap().clone();
    assert_eq!(who.role, Role::Teacher);

    let second = manager(&storage);
    assert_eq!(second.current(), Some(&who));
    assert_eq!(second.restore_session(), Some(who));

    first.sign_out().unwrap();
    assert!(first.current().is_none());
    assert!(manager(&storage).current().is_none());
  }

  #[test]
  fn failed_sign_in_keeps_existing_session() {
    let storage = MemoryStore::new();
    let mut auth = manager(&storage);
    auth.sign_in("B.F.Andi", "bazfuandi05").unwrap();

    assert!(auth.sign_in("TanárÚr", "nope").is_err());
    assert_eq!(auth.current().map(|i| i.id.as_str()), Some("2"));
    assert_eq!(manager(&storage).current().map(|i| i.id.as_str()), Some("2"));
  }

  #[test]
  fn sign_out_is_idempotent() {
    let storage = MemoryStore::new();
    let mut auth = manager(&storage);
    auth.sign_out().unwrap();
    auth.sign_out().unwrap();
    assert!(auth.current().is_none());
  }

  /// Keeps whatever session is stored; removing it always fails.
  #[derive(Debug, Clone)]
  struct StuckSession(MemoryStore);

  #[derive(Debug, thiserror::Error)]
  #[error("storage is read-only")]
  struct ReadOnly;

  impl KeyValueStore for StuckSession {
    type Error = ReadOnly;

    fn get(&self, key: &str) -> Result<Option<String>, ReadOnly> {
      Ok(self.0.get(key).unwrap_or_default())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ReadOnly> {
      self.0.set(key, value).map_err(|e| match e {})
    }

    fn remove(&self, _: &str) -> Result<(), ReadOnly> { Err(ReadOnly) }
  }

  #[test]
  fn failed_sign_out_still_clears_memory() {
    let storage = MemoryStore::new();
    let mut auth = AuthManager::new(StaticDirectory::reference(), StuckSession(storage.clone()));
    auth.sign_in("TanárÚr", "090807").unwrap();

    let err = auth.sign_out().unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert!(auth.current().is_none());
    assert!(storage.get(SESSION_KEY).unwrap().is_some());
  }

  #[test]
  fn corrupt_session_means_signed_out() {
    let storage = MemoryStore::new();
    storage.set(SESSION_KEY, "\"half an identity").unwrap();
    assert!(manager(&storage).current().is_none());
  }

  #[test]
  fn restored_identity_is_returned_unchanged() {
    // Sessions are trusted as stored, even for identities the directory no
    // longer knows.
    let storage = MemoryStore::new();
    let retired = Identity {
      id:           "7".into(),
      username:     "Régi".into(),
      password:     "x".into(),
      role:         Role::Student,
      display_name: "Régi Diák".into(),
    };
    storage.set(SESSION_KEY, &serde_json::to_string(&retired).unwrap()).unwrap();
    assert_eq!(manager(&storage).current(), Some(&retired));
  }
}
