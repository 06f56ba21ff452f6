//! SQLite backend for the Scribe lexicon store.
//!
//! Wraps [`tokio_rusqlite`] so all database access for a dataset runs on one
//! dedicated thread without blocking the async runtime. That thread is also
//! what serializes reads against writes.

mod install;
mod session;
mod store;

pub mod error;
pub mod schema;

pub use error::{Error, Result};
pub use install::{DatasetInstaller, Installation};
pub use session::LexiconSession;
pub use store::{AccessMode, DatasetStats, SqliteLexicon};
