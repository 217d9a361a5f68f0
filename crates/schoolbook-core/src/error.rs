//! Error types for `schoolbook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No identity matched the supplied credentials. Deliberately carries no
  /// detail: an unknown username and a wrong password look the same.
  #[error("invalid username or password")]
  AuthenticationFailed,

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// Box a backend error from any [`crate::storage::KeyValueStore`].
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
