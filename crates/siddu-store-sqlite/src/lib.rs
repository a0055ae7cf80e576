//! SQLite backend for the Siddu Verse store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every uniqueness invariant of the
//! domain (one profile per user, one application per profile and call, one
//! like per user and target) is a constraint in the schema.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
