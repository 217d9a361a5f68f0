//! Error type for `schoolbook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// A previous holder of the connection panicked mid-call.
  #[error("database connection lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
