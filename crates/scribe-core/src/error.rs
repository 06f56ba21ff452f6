//! Error types for `scribe-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown language code: {0:?}")]
  UnknownLanguage(String),

  #[error("unknown verb attribute: {0:?}")]
  UnknownAttribute(String),

  #[error("grammar resource not found: {}", .0.display())]
  GrammarNotFound(PathBuf),

  #[error("malformed grammar resource {}: {source}", path.display())]
  Grammar {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
