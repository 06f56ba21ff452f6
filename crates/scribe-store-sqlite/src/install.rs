//! Dataset materialization: copying a packaged dataset into the session's
//! private storage before first use.

use std::path::PathBuf;

use scribe_core::Language;

use crate::{Error, Result, SqliteLexicon};

/// What [`DatasetInstaller::install`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
  /// The packaged dataset was copied into the session directory.
  Installed,
  /// A working copy already existed and was left untouched.
  Reused,
}

/// Resolves languages to dataset files and materializes working copies.
///
/// Packaged datasets under `packaged_dir` are never written to unless the
/// working copy cannot be used, and even then only read.
#[derive(Debug, Clone)]
pub struct DatasetInstaller {
  packaged_dir: PathBuf,
  session_dir:  PathBuf,
}

impl DatasetInstaller {
  pub fn new(
    packaged_dir: impl Into<PathBuf>,
    session_dir: impl Into<PathBuf>,
  ) -> Self {
    Self { packaged_dir: packaged_dir.into(), session_dir: session_dir.into() }
  }

  pub fn packaged_path(&self, language: Language) -> PathBuf {
    self.packaged_dir.join(language.dataset_file_name())
  }

  pub fn working_path(&self, language: Language) -> PathBuf {
    self.session_dir.join(language.dataset_file_name())
  }

  /// Make sure a working copy of `language`'s dataset exists.
  ///
  /// The copy is written under a temporary name and renamed into place, so
  /// an interrupted copy is never mistaken for an installed dataset.
  pub async fn install(&self, language: Language) -> Result<Installation> {
    let working = self.working_path(language);
    if tokio::fs::try_exists(&working).await? {
      tracing::debug!(%language, path = %working.display(), "reusing working copy");
      return Ok(Installation::Reused);
    }

    let packaged = self.packaged_path(language);
    if !tokio::fs::try_exists(&packaged).await? {
      return Err(Error::DatasetMissing(packaged));
    }

    tokio::fs::create_dir_all(&self.session_dir).await?;
    let partial = working.with_extension("partial");
    if let Err(e) = tokio::fs::copy(&packaged, &partial).await {
      tokio::fs::remove_file(&partial).await.ok();
      return Err(e.into());
    }
    tokio::fs::rename(&partial, &working).await?;

    tracing::info!(
      %language,
      from = %packaged.display(),
      to = %working.display(),
      "materialized dataset"
    );
    Ok(Installation::Installed)
  }

  /// Open `language`'s dataset for the session.
  ///
  /// The working copy is installed if needed and opened read-write. A reused
  /// copy that will not open is replaced by a fresh one from the packaged
  /// dataset. Only if that fails as well is the packaged dataset opened
  /// read-only in place. Failing that too is fatal.
  pub async fn open(&self, language: Language) -> Result<SqliteLexicon> {
    let error = match self.open_working_copy(language).await {
      Ok(store) => return Ok(store),
      Err(e @ Error::DatasetMissing(_)) => return Err(e),
      Err(e) => e,
    };

    let packaged = self.packaged_path(language);
    tracing::warn!(
      %language,
      %error,
      path = %packaged.display(),
      "working copy unusable; opening packaged dataset read-only"
    );
    SqliteLexicon::open_read_only(&packaged)
      .await
      .map_err(|source| Error::Initialization {
        path:   packaged,
        source: Box::new(source),
      })
  }

  async fn open_working_copy(&self, language: Language) -> Result<SqliteLexicon> {
    let working = self.working_path(language);
    let store = match self.install(language).await? {
      Installation::Installed => SqliteLexicon::open(&working).await?,
      Installation::Reused => match SqliteLexicon::open(&working).await {
        Ok(store) => store,
        Err(error) => {
          tracing::warn!(
            %language,
            %error,
            path = %working.display(),
            "working copy unreadable; materializing it again"
          );
          self.discard_working_copy(language).await?;
          self.install(language).await?;
          SqliteLexicon::open(&working).await?
        }
      },
    };

    // The store is usable without the index; keep the user's words.
    match store.ensure_autocomplete_index().await {
      Ok(0) => {}
      Ok(removed) => {
        tracing::info!(%language, removed, "removed duplicate lexicon words");
      }
      Err(error) => {
        tracing::warn!(
          %language,
          %error,
          "could not enforce unique lexicon words; keeping working copy"
        );
      }
    }
    Ok(store)
  }

  /// Delete the working copy and any journal SQLite left beside it, so a
  /// stale journal is never applied to the replacement.
  async fn discard_working_copy(&self, language: Language) -> Result<()> {
    let working = self.working_path(language);
    tokio::fs::remove_file(&working).await?;
    for suffix in ["-journal", "-wal", "-shm"] {
      let mut side = working.clone().into_os_string();
      side.push(suffix);
      match tokio::fs::remove_file(&side).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
      }
    }
    Ok(())
  }
}
