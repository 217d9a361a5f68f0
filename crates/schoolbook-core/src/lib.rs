//! Core types and trait definitions for schoolbook.
//!
//! Holds the domain model (identities, schedule entries, grades, absences),
//! the storage abstraction, the session manager and the record store. Free of
//! any concrete storage backend or user interface.

pub mod auth;
pub mod collection;
pub mod error;
pub mod identity;
pub mod record;
pub mod records;
pub mod storage;
pub mod view;

mod seed;

pub use error::{Error, Result};
