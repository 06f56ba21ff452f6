//! The `[""]` not-found convention.
//!
//! Existing keyboard code tests lookup results against a single empty string
//! to detect "no match". [`SentinelLexicon`] exposes a [`LexiconStore`] with
//! that contract; everything else in the workspace works with `Option`.

use crate::{schema::VerbAttribute, store::LexiconStore};

/// Collapse an optional lookup result into the sentinel form.
pub fn sentinel(result: Option<Vec<String>>) -> Vec<String> {
  result.unwrap_or_else(|| vec![String::new()])
}

/// Whether `values` is the not-found sentinel.
///
/// A found row whose only projected field is empty looks the same; the
/// convention cannot tell them apart.
pub fn is_not_found(values: &[String]) -> bool {
  matches!(values, [only] if only.is_empty())
}

/// Adapter presenting a [`LexiconStore`] with sentinel results.
#[derive(Debug, Clone)]
pub struct SentinelLexicon<S> {
  inner: S,
}

impl<S: LexiconStore> SentinelLexicon<S> {
  pub fn new(inner: S) -> Self { Self { inner } }

  pub fn inner(&self) -> &S { &self.inner }

  pub fn into_inner(self) -> S { self.inner }

  pub async fn lookup_autosuggestions(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.autosuggestions(word).await)
  }

  pub async fn lookup_emojis(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.emojis(word).await)
  }

  pub async fn lookup_noun_form(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.noun_form(word).await)
  }

  pub async fn lookup_noun_plural(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.noun_plural(word).await)
  }

  pub async fn lookup_preposition_form(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.preposition_form(word).await)
  }

  pub async fn lookup_translation(&self, word: &str) -> Vec<String> {
    sentinel(self.inner.translation(word).await)
  }

  pub async fn lookup_verb(
    &self,
    verb: &str,
    attributes: &[VerbAttribute],
  ) -> Vec<String> {
    sentinel(self.inner.verb_forms(verb, attributes).await)
  }

  pub async fn lookup_autocompletions(&self, prefix: &str) -> Vec<String> {
    sentinel(self.inner.autocompletions(prefix).await)
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::BTreeMap, sync::Mutex};

  use super::*;

  /// Just enough of a store to drive the adapter.
  #[derive(Default)]
  struct MapLexicon {
    translations: BTreeMap<String, String>,
    words:        Mutex<Vec<String>>,
  }

  impl LexiconStore for MapLexicon {
    async fn autosuggestions(&self, _word: &str) -> Option<Vec<String>> { None }

    async fn emojis(&self, _word: &str) -> Option<Vec<String>> { None }

    async fn noun_form(&self, _word: &str) -> Option<Vec<String>> { None }

    async fn noun_plural(&self, _word: &str) -> Option<Vec<String>> { None }

    async fn preposition_form(&self, _word: &str) -> Option<Vec<String>> {
      None
    }

    async fn translation(&self, word: &str) -> Option<Vec<String>> {
      self.translations.get(word).map(|t| vec![t.clone()])
    }

    async fn verb_forms(
      &self,
      _verb: &str,
      _attributes: &[VerbAttribute],
    ) -> Option<Vec<String>> {
      None
    }

    async fn autocompletions(&self, prefix: &str) -> Option<Vec<String>> {
      let words = self.words.lock().unwrap();
      let hits: Vec<String> = words
        .iter()
        .filter(|w| w.starts_with(prefix))
        .cloned()
        .collect();
      (!hits.is_empty()).then_some(hits)
    }

    async fn insert_autocomplete_entry(&self, word: &str) -> bool {
      self.words.lock().unwrap().push(word.to_owned());
      true
    }

    async fn insert_autocomplete_entries(&self, words: Vec<String>) -> usize {
      let n = words.len();
      self.words.lock().unwrap().extend(words);
      n
    }

    async fn deduplicate_autocomplete_entries(&self) -> usize { 0 }
  }

  #[test]
  fn none_becomes_single_empty_string() {
    assert_eq!(sentinel(None), vec![String::new()]);
    assert_eq!(sentinel(Some(vec!["a".into()])), vec!["a".to_string()]);
  }

  #[test]
  fn detects_sentinel() {
    assert!(is_not_found(&[String::new()]));
    assert!(!is_not_found(&[]));
    assert!(!is_not_found(&["x".into()]));
    assert!(!is_not_found(&[String::new(), String::new()]));
  }

  #[tokio::test]
  async fn adapter_returns_sentinel_for_misses() {
    let mut store = MapLexicon::default();
    store.translations.insert("Haus".into(), "house".into());
    let lexicon = SentinelLexicon::new(store);

    assert_eq!(lexicon.lookup_translation("Haus").await, vec!["house"]);
    assert_eq!(lexicon.lookup_translation("Maus").await, vec![""]);
    assert_eq!(lexicon.lookup_autosuggestions("xyz_not_present").await, vec![""]);
    assert!(is_not_found(&lexicon.lookup_autocompletions("q").await));

    lexicon.inner().insert_autocomplete_entry("quail").await;
    assert_eq!(lexicon.lookup_autocompletions("q").await, vec!["quail"]);
  }
}
