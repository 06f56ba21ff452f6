//! Layered configuration: defaults, an optional TOML file, then `SCRIBE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime configuration, deserialised from `scribe.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScribeConfig {
  /// Directory holding the packaged `<CODE>LanguageData.sqlite` datasets.
  #[serde(default = "default_packaged_dir")]
  pub packaged_dir: PathBuf,
  /// Writable directory the active dataset is materialized into.
  #[serde(default = "default_session_dir")]
  pub session_dir:  PathBuf,
  /// Directory of grammar JSON resources; defaults to `packaged_dir`.
  #[serde(default)]
  pub grammar_dir:  Option<PathBuf>,
  /// Language code used when `--language` is not given.
  #[serde(default = "default_language")]
  pub language:     String,
}

fn default_packaged_dir() -> PathBuf { PathBuf::from("datasets") }

fn default_session_dir() -> PathBuf { PathBuf::from("~/.local/share/scribe") }

fn default_language() -> String { "EN".to_owned() }

impl ScribeConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SCRIBE"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ScribeConfig")?;

    cfg.packaged_dir = expand_tilde(&cfg.packaged_dir);
    cfg.session_dir = expand_tilde(&cfg.session_dir);
    cfg.grammar_dir = cfg.grammar_dir.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  pub fn grammar_dir(&self) -> &Path {
    self.grammar_dir.as_deref().unwrap_or(&self.packaged_dir)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scribe.toml");
    std::fs::write(
      &path,
      "packaged_dir = \"/opt/scribe/data\"\nlanguage = \"de\"\n",
    )
    .unwrap();

    let cfg = ScribeConfig::load(&path).unwrap();
    assert_eq!(cfg.packaged_dir, PathBuf::from("/opt/scribe/data"));
    assert_eq!(cfg.language, "de");
    assert_eq!(cfg.grammar_dir(), Path::new("/opt/scribe/data"));
  }

  #[test]
  fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScribeConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.packaged_dir, PathBuf::from("datasets"));
    assert!(cfg.grammar_dir.is_none());
  }

  #[test]
  fn relative_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("data/x")), PathBuf::from("data/x"));
  }
}
