//! SQLite backend for the Carte card store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Every multi-statement write
//! runs inside a single rusqlite transaction within one connection call, so
//! a failure partway through rolls back entirely.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
