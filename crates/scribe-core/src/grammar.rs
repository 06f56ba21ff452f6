//! Loader for the auxiliary grammar JSON resources shipped next to the
//! datasets.
//!
//! The documents are returned as untyped [`serde_json::Value`]s; interpreting
//! them is up to the caller.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{Error, Result};

/// Path of the grammar resource `name` inside `dir`. A `.json` extension is
/// appended when `name` has none.
pub fn grammar_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
  let path = dir.as_ref().join(name);
  if path.extension().is_some_and(|ext| ext == "json") {
    path
  } else {
    dir.as_ref().join(format!("{name}.json"))
  }
}

/// Read and parse the grammar resource `name` from `dir`.
pub fn load_grammar(dir: impl AsRef<Path>, name: &str) -> Result<Value> {
  let path = grammar_path(dir, name);
  let raw = match std::fs::read_to_string(&path) {
    Ok(raw) => raw,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      return Err(Error::GrammarNotFound(path));
    }
    Err(e) => return Err(Error::Io(e)),
  };
  serde_json::from_str(&raw).map_err(|source| Error::Grammar { path, source })
}
