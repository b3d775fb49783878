//! SQLite backend for the cadence habit store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The schema's uniqueness constraints
//! (one day per date, one completion mark per day/habit pair) are the
//! correctness backstop for concurrent writers.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
