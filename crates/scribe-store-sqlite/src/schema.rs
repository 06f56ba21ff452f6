//! SQL schema of a Scribe language dataset.
//!
//! Packaged datasets are built elsewhere; this DDL exists so empty datasets
//! can be created locally and so the store's expectations are written down
//! in one place. Table and column names are a compatibility contract with
//! existing datasets.

use scribe_core::VerbAttribute;
use strum::IntoEnumIterator as _;

/// DDL for every table except `verbs`; idempotent thanks to
/// `CREATE TABLE IF NOT EXISTS`.
const FIXED_TABLES: &str = "
CREATE TABLE IF NOT EXISTS autocomplete_lexicon (
    word TEXT NOT NULL UNIQUE
);

-- Up to three ranked follow-up words; unused slots are empty or NULL.
CREATE TABLE IF NOT EXISTS autosuggestions (
    word         TEXT NOT NULL UNIQUE,
    suggestion_0 TEXT,
    suggestion_1 TEXT,
    suggestion_2 TEXT
);

CREATE TABLE IF NOT EXISTS emoji_keywords (
    word    TEXT NOT NULL UNIQUE,
    emoji_0 TEXT,
    emoji_1 TEXT,
    emoji_2 TEXT
);

CREATE TABLE IF NOT EXISTS nouns (
    noun   TEXT NOT NULL UNIQUE,
    form   TEXT,
    plural TEXT
);

CREATE TABLE IF NOT EXISTS prepositions (
    preposition TEXT NOT NULL UNIQUE,
    form        TEXT
);

CREATE TABLE IF NOT EXISTS translations (
    word        TEXT NOT NULL UNIQUE,
    translation TEXT
);
";

/// Unique index added to legacy datasets whose `autocomplete_lexicon` was
/// created without the constraint. Duplicates must be removed first.
pub const AUTOCOMPLETE_INDEX: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS autocomplete_lexicon_word_idx
    ON autocomplete_lexicon(word);
";

/// Schema version written to `PRAGMA user_version` by [`dataset_schema`].
pub const SCHEMA_VERSION: u32 = 1;

/// Full DDL for an empty dataset, with one `verbs` column per
/// [`VerbAttribute`].
pub fn dataset_schema() -> String {
  let verb_columns: String = VerbAttribute::iter()
    .map(|attr| format!(",\n    {} TEXT", attr.column()))
    .collect();

  format!(
    "{FIXED_TABLES}
CREATE TABLE IF NOT EXISTS verbs (
    verb TEXT NOT NULL UNIQUE{verb_columns}
);

PRAGMA user_version = {SCHEMA_VERSION};
"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn schema_has_a_column_per_verb_attribute() {
    let ddl = dataset_schema();
    for attr in VerbAttribute::iter() {
      assert!(ddl.contains(&format!("{} TEXT", attr.column())), "{attr}");
    }
  }

  #[test]
  fn schema_applies_to_a_fresh_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(&dataset_schema()).unwrap();
    conn.execute_batch(AUTOCOMPLETE_INDEX).unwrap();
    let version: u32 = conn
      .query_row("PRAGMA user_version", [], |r| r.get(0))
      .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
  }
}
