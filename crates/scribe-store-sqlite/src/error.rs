//! Error type for `scribe-store-sqlite`.
//!
//! Only opening a dataset can fail outward. Lookup and write failures are
//! absorbed by [`SqliteLexicon`](crate::SqliteLexicon) and never reach callers
//! of the `LexiconStore` trait.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] scribe_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// Neither a packaged dataset nor a working copy exists.
  #[error("no dataset at {}", .0.display())]
  DatasetMissing(PathBuf),

  /// The working copy and the packaged fallback both failed to open.
  #[error("cannot open dataset {}: {source}", path.display())]
  Initialization {
    path:   PathBuf,
    #[source]
    source: Box<Error>,
  },

  #[error("dataset is open read-only")]
  ReadOnly,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
