//! [`SqliteLexicon`], the SQLite implementation of [`LexiconStore`].

use std::{
  fmt,
  path::{Path, PathBuf},
};

use rusqlite::{
  OpenFlags, OptionalExtension as _,
  functions::FunctionFlags,
  types::ValueRef,
};
use scribe_core::{
  LexiconStore,
  schema::{EMOJI_COLUMNS, LexiconTable, SUGGESTION_COLUMNS, VerbAttribute},
};
use strum::IntoEnumIterator as _;

use crate::{
  Error, Result,
  schema::{AUTOCOMPLETE_INDEX, dataset_schema},
};

// ─── Statements ──────────────────────────────────────────────────────────────

/// SQL function lower-casing text with full Unicode rules. SQLite's own
/// `lower`, `LIKE` and `NOCASE` only fold ASCII.
const FOLD_FUNCTION: &str = "lexicon_fold";

const AUTOCOMPLETE_SQL: &str = "SELECT word FROM autocomplete_lexicon
   WHERE lexicon_fold(word) LIKE ?1 ESCAPE '\\'
   ORDER BY lexicon_fold(word) ASC, word ASC
   LIMIT 3";

const UNIQUE_WORD_INDEX_SQL: &str = "SELECT 1
   FROM pragma_index_list('autocomplete_lexicon') AS idx
   WHERE idx.\"unique\" = 1
     AND (SELECT COUNT(*) FROM pragma_index_info(idx.name)) = 1
     AND (SELECT name FROM pragma_index_info(idx.name)) = 'word'
   LIMIT 1";

const INSERT_WORD_SQL: &str =
  "INSERT OR IGNORE INTO autocomplete_lexicon (word) VALUES (?1)";

const DEDUPLICATE_SQL: &str = "DELETE FROM autocomplete_lexicon
   WHERE rowid NOT IN (
     SELECT MIN(rowid) FROM autocomplete_lexicon GROUP BY word
   )";

/// A single-row lookup of fixed columns by a table's key column.
///
/// Table and column names only ever come from the typed schema enums.
struct Projection {
  table:     LexiconTable,
  columns:   Vec<&'static str>,
  /// Also match the lower-cased key, preferring an exact match.
  case_fold: bool,
}

impl Projection {
  fn new(
    table: LexiconTable,
    columns: impl IntoIterator<Item = &'static str>,
  ) -> Self {
    Self { table, columns: columns.into_iter().collect(), case_fold: false }
  }

  fn case_folded(mut self) -> Self {
    self.case_fold = true;
    self
  }

  fn sql(&self) -> String {
    let key = self.table.key_column();
    let filter = if self.case_fold {
      format!("{key} = ?1 OR {key} = ?2 ORDER BY {key} = ?1 DESC")
    } else {
      format!("{key} = ?1")
    };
    format!(
      "SELECT {} FROM {} WHERE {filter} LIMIT 1",
      self.columns.join(", "),
      self.table.table_name(),
    )
  }

  fn args(&self, word: &str) -> Vec<String> {
    if self.case_fold {
      vec![word.to_owned(), word.to_lowercase()]
    } else {
      vec![word.to_owned()]
    }
  }
}

/// Escape `LIKE` metacharacters so `prefix` matches literally, then append
/// the trailing wildcard.
fn like_prefix(prefix: &str) -> String {
  let mut pattern = String::with_capacity(prefix.len() + 1);
  for c in prefix.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

/// Install the lexicon's SQL functions on a freshly opened connection.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FUNCTION,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      Ok(match ctx.get_raw(0) {
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).to_lowercase()),
        _ => None,
      })
    },
  )
}

/// Read any column as text. NULL reads as the empty string.
fn column_text(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<String> {
  Ok(match row.get_ref(idx)? {
    ValueRef::Null => String::new(),
    ValueRef::Integer(i) => i.to_string(),
    ValueRef::Real(f) => f.to_string(),
    ValueRef::Text(t) | ValueRef::Blob(t) => {
      String::from_utf8_lossy(t).into_owned()
    }
  })
}

fn has_unique_word_index(conn: &rusqlite::Connection) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(UNIQUE_WORD_INDEX_SQL, [], |_| Ok(()))
      .optional()?
      .is_some(),
  )
}

/// Log a failed statement and degrade to `None`.
fn absorb<T>(result: Result<T>, statement: &str, args: &[String]) -> Option<T> {
  match result {
    Ok(value) => Some(value),
    Err(error) => {
      tracing::warn!(
        statement = statement.trim(),
        ?args,
        %error,
        "lexicon statement failed"
      );
      None
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Whether a store may modify its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
  Writable,
  /// Opened in place on a packaged dataset; writes are rejected.
  ReadOnly,
}

/// Row counts per dataset table. `None` marks a table that could not be
/// counted, e.g. because the dataset lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetStats {
  pub counts: Vec<(LexiconTable, Option<usize>)>,
}

impl DatasetStats {
  pub fn count(&self, table: LexiconTable) -> Option<usize> {
    self
      .counts
      .iter()
      .find(|(t, _)| *t == table)
      .and_then(|(_, n)| *n)
  }
}

/// A language dataset backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted, and its
/// worker thread shuts down once the last clone is dropped.
#[derive(Clone)]
pub struct SqliteLexicon {
  pub(crate) conn: tokio_rusqlite::Connection,
  mode:            AccessMode,
  path:            Option<PathBuf>,
}

impl fmt::Debug for SqliteLexicon {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SqliteLexicon")
      .field("mode", &self.mode)
      .field("path", &self.path)
      .finish_non_exhaustive()
  }
}

impl SqliteLexicon {
  /// Open an existing dataset at `path` for reading and writing.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Self::open_with(path.as_ref(), flags, AccessMode::Writable).await
  }

  /// Open an existing dataset at `path` without write access.
  pub async fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Self::open_with(path.as_ref(), flags, AccessMode::ReadOnly).await
  }

  /// Create (or open) a dataset at `path` and make sure every table exists.
  pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self {
      conn,
      mode: AccessMode::Writable,
      path: Some(path.to_path_buf()),
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an empty in-memory dataset, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, mode: AccessMode::Writable, path: None };
    store.init_schema().await?;
    Ok(store)
  }

  async fn open_with(
    path: &Path,
    flags: OpenFlags,
    mode: AccessMode,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_with_flags(path, flags).await?;
    // SQLite defers reading the header; touch the schema so a corrupt or
    // non-database file fails here rather than on the first lookup.
    conn
      .call(|conn| {
        conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |r| {
          r.get::<_, i64>(0)
        })?;
        register_functions(conn)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, mode, path: Some(path.to_path_buf()) })
  }

  async fn init_schema(&self) -> Result<()> {
    let ddl = dataset_schema();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        register_functions(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub fn mode(&self) -> AccessMode { self.mode }

  /// The dataset file, or `None` for in-memory stores.
  pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

  fn check_writable(&self) -> Result<()> {
    match self.mode {
      AccessMode::Writable => Ok(()),
      AccessMode::ReadOnly => Err(Error::ReadOnly),
    }
  }

  /// Remove duplicate lexicon words, then enforce uniqueness with an index.
  ///
  /// Legacy datasets may ship `autocomplete_lexicon` without a uniqueness
  /// constraint. Returns the number of duplicate rows removed, which is
  /// always zero once a unique index on `word` exists; such datasets are
  /// not scanned again.
  pub async fn ensure_autocomplete_index(&self) -> Result<usize> {
    self.check_writable()?;
    let removed = self
      .conn
      .call(|conn| {
        if has_unique_word_index(conn)? {
          return Ok(0);
        }
        let tx = conn.transaction()?;
        let removed = tx.execute(DEDUPLICATE_SQL, [])?;
        tx.execute_batch(AUTOCOMPLETE_INDEX)?;
        tx.commit()?;
        Ok(removed)
      })
      .await?;
    Ok(removed)
  }

  /// Whether `autocomplete_lexicon.word` is already covered by a unique
  /// index, either the table's own `UNIQUE` constraint or ours.
  pub async fn has_unique_autocomplete_index(&self) -> Result<bool> {
    let unique = self.conn.call(|conn| Ok(has_unique_word_index(conn)?)).await?;
    Ok(unique)
  }

  /// Count the rows of every dataset table.
  ///
  /// A table that cannot be counted is logged and reported as `None`.
  pub async fn stats(&self) -> Result<DatasetStats> {
    let counts = self
      .conn
      .call(|conn| {
        let counts: Vec<(LexiconTable, String, rusqlite::Result<i64>)> =
          LexiconTable::iter()
            .map(|table| {
              let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());
              let n = conn.query_row(&sql, [], |r| r.get::<_, i64>(0));
              (table, sql, n)
            })
            .collect();
        Ok(counts)
      })
      .await?;

    let counts = counts
      .into_iter()
      .map(|(table, sql, n)| {
        let n = absorb(n.map_err(|e| Error::Database(e.into())), &sql, &[]);
        (table, n.and_then(|n| usize::try_from(n).ok()))
      })
      .collect();
    Ok(DatasetStats { counts })
  }

  // ── Fallible internals ────────────────────────────────────────────────────

  async fn try_row(
    &self,
    sql: String,
    args: Vec<String>,
  ) -> Result<Option<Vec<String>>> {
    let row: Option<Vec<String>> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&sql)?;
        let width = stmt.column_count();
        Ok(
          stmt
            .query_row(rusqlite::params_from_iter(args.iter()), |row| {
              (0..width)
                .map(|i| column_text(row, i))
                .collect::<rusqlite::Result<Vec<_>>>()
            })
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn try_autocompletions(&self, pattern: String) -> Result<Vec<String>> {
    let words = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(AUTOCOMPLETE_SQL)?;
        let words = stmt
          .query_map([pattern], |row| column_text(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
      })
      .await?;
    Ok(words)
  }

  async fn try_insert_words(&self, words: Vec<String>) -> Result<usize> {
    self.check_writable()?;
    let added = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut added = 0;
        {
          let mut stmt = tx.prepare_cached(INSERT_WORD_SQL)?;
          for word in words.iter().filter(|w| !w.trim().is_empty()) {
            added += stmt.execute([word])?;
          }
        }
        tx.commit()?;
        Ok(added)
      })
      .await?;
    Ok(added)
  }

  async fn try_deduplicate(&self) -> Result<usize> {
    self.check_writable()?;
    let removed = self
      .conn
      .call(|conn| Ok(conn.execute(DEDUPLICATE_SQL, [])?))
      .await?;
    Ok(removed)
  }

  async fn lookup(
    &self,
    projection: Projection,
    word: &str,
  ) -> Option<Vec<String>> {
    let sql = projection.sql();
    let args = projection.args(word);
    let result = self.try_row(sql.clone(), args.clone()).await;
    absorb(result, &sql, &args).flatten()
  }
}

// ─── LexiconStore impl ───────────────────────────────────────────────────────

impl LexiconStore for SqliteLexicon {
  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn autosuggestions(&self, word: &str) -> Option<Vec<String>> {
    let projection =
      Projection::new(LexiconTable::Autosuggestions, SUGGESTION_COLUMNS);
    self.lookup(projection, word).await
  }

  async fn emojis(&self, word: &str) -> Option<Vec<String>> {
    let projection = Projection::new(LexiconTable::EmojiKeywords, EMOJI_COLUMNS);
    self.lookup(projection, word).await
  }

  async fn noun_form(&self, word: &str) -> Option<Vec<String>> {
    let projection = Projection::new(LexiconTable::Nouns, ["form"]).case_folded();
    self.lookup(projection, word).await
  }

  async fn noun_plural(&self, word: &str) -> Option<Vec<String>> {
    let projection =
      Projection::new(LexiconTable::Nouns, ["plural"]).case_folded();
    self.lookup(projection, word).await
  }

  async fn preposition_form(&self, word: &str) -> Option<Vec<String>> {
    let projection = Projection::new(LexiconTable::Prepositions, ["form"]);
    self.lookup(projection, word).await
  }

  async fn translation(&self, word: &str) -> Option<Vec<String>> {
    let projection = Projection::new(LexiconTable::Translations, ["translation"]);
    self.lookup(projection, word).await
  }

  async fn verb_forms(
    &self,
    verb: &str,
    attributes: &[VerbAttribute],
  ) -> Option<Vec<String>> {
    if attributes.is_empty() {
      tracing::debug!(verb, "verb lookup without attributes");
      return None;
    }
    let projection = Projection::new(
      LexiconTable::Verbs,
      attributes.iter().map(|attr| attr.column()),
    );
    self.lookup(projection, verb).await
  }

  async fn autocompletions(&self, prefix: &str) -> Option<Vec<String>> {
    let pattern = like_prefix(&prefix.to_lowercase());
    let result = self.try_autocompletions(pattern.clone()).await;
    absorb(result, AUTOCOMPLETE_SQL, &[pattern])
      .filter(|words| !words.is_empty())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_autocomplete_entry(&self, word: &str) -> bool {
    let args = vec![word.to_owned()];
    let result = self.try_insert_words(args.clone()).await;
    absorb(result, INSERT_WORD_SQL, &args).is_some_and(|added| added > 0)
  }

  async fn insert_autocomplete_entries(&self, words: Vec<String>) -> usize {
    let count = words.len();
    let result = self.try_insert_words(words).await;
    absorb(result, INSERT_WORD_SQL, &[format!("<{count} words>")])
      .unwrap_or(0)
  }

  async fn deduplicate_autocomplete_entries(&self) -> usize {
    absorb(self.try_deduplicate().await, DEDUPLICATE_SQL, &[]).unwrap_or(0)
  }
}
