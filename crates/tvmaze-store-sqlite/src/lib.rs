//! SQLite backend for the TVmaze show catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod path;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use path::expand_tilde;
pub use store::SqliteStore;
