//! Typed names for the dataset tables and projectable columns.
//!
//! Query builders only ever splice these `&'static str` names into SQL, so a
//! caller can choose which columns to read without handing raw identifiers to
//! the storage layer.

use std::str::FromStr as _;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// One table of a language dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum LexiconTable {
  Autocomplete,
  Autosuggestions,
  EmojiKeywords,
  Nouns,
  Verbs,
  Prepositions,
  Translations,
}

impl LexiconTable {
  pub fn table_name(self) -> &'static str {
    match self {
      Self::Autocomplete => "autocomplete_lexicon",
      Self::Autosuggestions => "autosuggestions",
      Self::EmojiKeywords => "emoji_keywords",
      Self::Nouns => "nouns",
      Self::Verbs => "verbs",
      Self::Prepositions => "prepositions",
      Self::Translations => "translations",
    }
  }

  /// The column rows are looked up by.
  pub fn key_column(self) -> &'static str {
    match self {
      Self::Nouns => "noun",
      Self::Verbs => "verb",
      Self::Prepositions => "preposition",
      _ => "word",
    }
  }
}

/// Suggestion columns of `autosuggestions`, in slot order.
pub const SUGGESTION_COLUMNS: [&str; 3] =
  ["suggestion_0", "suggestion_1", "suggestion_2"];

/// Emoji columns of `emoji_keywords`, in slot order.
pub const EMOJI_COLUMNS: [&str; 3] = ["emoji_0", "emoji_1", "emoji_2"];

// ─── Verb attributes ─────────────────────────────────────────────────────────

/// A projectable column of the `verbs` table.
///
/// Not every dataset carries every column; asking a dataset for a column it
/// lacks is a query failure and is absorbed like any other.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum VerbAttribute {
  #[strum(serialize = "infinitive")]
  Infinitive,
  #[strum(serialize = "presSimp")]
  PresentSimple,
  #[strum(serialize = "presPart")]
  PresentParticiple,
  #[strum(serialize = "pastSimp")]
  PastSimple,
  #[strum(serialize = "pastPart")]
  PastPart,
  #[strum(serialize = "pastParticiple")]
  PastParticiple,
  #[strum(serialize = "auxiliaryVerb")]
  AuxiliaryVerb,

  #[strum(serialize = "presFPS")]
  PresentFirstSingular,
  #[strum(serialize = "presSPS")]
  PresentSecondSingular,
  #[strum(serialize = "presTPS")]
  PresentThirdSingular,
  #[strum(serialize = "presFPP")]
  PresentFirstPlural,
  #[strum(serialize = "presSPP")]
  PresentSecondPlural,
  #[strum(serialize = "presTPP")]
  PresentThirdPlural,

  #[strum(serialize = "pretFPS")]
  PreteriteFirstSingular,
  #[strum(serialize = "pretSPS")]
  PreteriteSecondSingular,
  #[strum(serialize = "pretTPS")]
  PreteriteThirdSingular,
  #[strum(serialize = "pretFPP")]
  PreteriteFirstPlural,
  #[strum(serialize = "pretSPP")]
  PreteriteSecondPlural,
  #[strum(serialize = "pretTPP")]
  PreteriteThirdPlural,

  #[strum(serialize = "impFPS")]
  ImperfectFirstSingular,
  #[strum(serialize = "impSPS")]
  ImperfectSecondSingular,
  #[strum(serialize = "impTPS")]
  ImperfectThirdSingular,
  #[strum(serialize = "impFPP")]
  ImperfectFirstPlural,
  #[strum(serialize = "impSPP")]
  ImperfectSecondPlural,
  #[strum(serialize = "impTPP")]
  ImperfectThirdPlural,
}

impl VerbAttribute {
  /// Parse a column name such as `"presTPS"`.
  pub fn from_column(name: &str) -> Result<Self> {
    Self::from_str(name.trim())
      .map_err(|_| Error::UnknownAttribute(name.to_owned()))
  }

  pub fn column(self) -> &'static str { self.into() }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn verb_attribute_parses_column_names() {
    assert_eq!(
      VerbAttribute::from_column("presTPS").unwrap(),
      VerbAttribute::PresentThirdSingular
    );
    assert_eq!(
      VerbAttribute::from_column("pastparticiple").unwrap(),
      VerbAttribute::PastParticiple
    );
    assert_eq!(VerbAttribute::AuxiliaryVerb.column(), "auxiliaryVerb");
  }

  #[test]
  fn arbitrary_identifiers_are_not_attributes() {
    let err = VerbAttribute::from_column("verb; DROP TABLE verbs").unwrap_err();
    assert!(matches!(err, Error::UnknownAttribute(_)));
    assert!(VerbAttribute::from_column("verb").is_err());
  }

  #[test]
  fn column_names_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for attr in VerbAttribute::iter() {
      assert!(seen.insert(attr.column().to_ascii_lowercase()), "{attr}");
    }
  }

  #[test]
  fn key_columns() {
    assert_eq!(LexiconTable::Nouns.key_column(), "noun");
    assert_eq!(LexiconTable::EmojiKeywords.key_column(), "word");
    assert_eq!(LexiconTable::Autocomplete.table_name(), "autocomplete_lexicon");
  }
}
