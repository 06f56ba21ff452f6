//! The active-language session.

use std::sync::Arc;

use scribe_core::Language;
use tokio::sync::Mutex;

use crate::{DatasetInstaller, Result, SqliteLexicon};

struct Active {
  language: Language,
  store:    Arc<SqliteLexicon>,
}

/// Holds the one open dataset of a running keyboard session.
///
/// Handles returned by [`switch_to`](Self::switch_to) and
/// [`current`](Self::current) stay valid after a switch; the replaced
/// dataset is closed once its last handle is dropped, so operations already
/// in flight finish against the store they started on.
pub struct LexiconSession {
  installer: DatasetInstaller,
  active:    Mutex<Option<Active>>,
}

impl LexiconSession {
  pub fn new(installer: DatasetInstaller) -> Self {
    Self { installer, active: Mutex::new(None) }
  }

  pub fn installer(&self) -> &DatasetInstaller { &self.installer }

  /// Make `language` the active dataset and return a handle to it.
  ///
  /// Switching to the language already active returns the existing store.
  /// On failure the previous store stays active.
  pub async fn switch_to(&self, language: Language) -> Result<Arc<SqliteLexicon>> {
    let mut active = self.active.lock().await;
    if let Some(current) = active.as_ref()
      && current.language == language
    {
      return Ok(Arc::clone(&current.store));
    }

    let store = Arc::new(self.installer.open(language).await?);
    let previous = active.replace(Active { language, store: Arc::clone(&store) });

    match previous {
      Some(prev) => tracing::info!(
        from = %prev.language,
        to = %language,
        mode = ?store.mode(),
        "switched lexicon language"
      ),
      None => tracing::info!(%language, mode = ?store.mode(), "opened lexicon"),
    }
    Ok(store)
  }

  /// The active store, if any.
  pub async fn current(&self) -> Option<Arc<SqliteLexicon>> {
    self.active.lock().await.as_ref().map(|a| Arc::clone(&a.store))
  }

  pub async fn language(&self) -> Option<Language> {
    self.active.lock().await.as_ref().map(|a| a.language)
  }

  /// Release the active store.
  pub async fn close(&self) {
    if let Some(prev) = self.active.lock().await.take() {
      tracing::debug!(language = %prev.language, "closed lexicon");
    }
  }
}
