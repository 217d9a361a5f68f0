//! SQLite backend for schoolbook's key-value storage.
//!
//! One database file plays the part of a profile's persistent storage: every
//! key (session, schedule, grades, absences) is a row holding a JSON
//! document.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStorage;

#[cfg(test)]
mod tests;
