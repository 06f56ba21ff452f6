//! The `LexiconStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `scribe-store-sqlite`).
//! Keyboard-facing code depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::schema::VerbAttribute;

/// Read and write access to one language's lexical dataset.
///
/// Every operation is fail-soft: a storage failure is logged by the backend
/// and surfaces as "not found" (`None`) for reads or as a no-op for writes.
/// Nothing here returns an error, because a failed lookup must never
/// interrupt typing.
///
/// Reads return `None` when no row matched. Inside a matched row, NULL
/// columns read as the empty string so slot positions are kept. Callers that
/// need the `[""]` not-found convention wrap the store in
/// [`SentinelLexicon`](crate::sentinel::SentinelLexicon).
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait LexiconStore: Send + Sync {
  // ── Reads ─────────────────────────────────────────────────────────────

  /// Up to three follow-up suggestions for an exact `word` match.
  fn autosuggestions<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// Up to three emojis keyed by an exact `word` match.
  fn emojis<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// The grammatical form (gender/class) of a noun.
  ///
  /// Matches the noun as given or in lower case, in a single query; the
  /// first matching row wins.
  fn noun_form<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// The plural of a noun, matched like [`noun_form`](Self::noun_form).
  fn noun_plural<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// The case governed by a preposition.
  fn preposition_form<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  fn translation<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// Project the requested verb columns, in the order given.
  fn verb_forms<'a>(
    &'a self,
    verb: &'a str,
    attributes: &'a [VerbAttribute],
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  /// Up to three lexicon words starting with `prefix`, compared
  /// case-insensitively and ordered case-insensitively ascending.
  fn autocompletions<'a>(
    &'a self,
    prefix: &'a str,
  ) -> impl Future<Output = Option<Vec<String>>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Add `word` to the autocomplete lexicon unless it is already present.
  ///
  /// Returns `true` if a row was added.
  fn insert_autocomplete_entry<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = bool> + Send + 'a;

  /// Insert many words atomically, skipping blanks and words already present.
  ///
  /// Returns the number of rows added.
  fn insert_autocomplete_entries(
    &self,
    words: Vec<String>,
  ) -> impl Future<Output = usize> + Send + '_;

  /// Keep only the earliest row for every word of the autocomplete lexicon.
  ///
  /// Returns the number of rows removed.
  fn deduplicate_autocomplete_entries(
    &self,
  ) -> impl Future<Output = usize> + Send + '_;
}
