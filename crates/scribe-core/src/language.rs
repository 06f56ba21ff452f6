//! Languages with a packaged lexicon dataset.

use std::str::FromStr as _;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// A keyboard language. Each one maps to exactly one packaged dataset.
///
/// Codes parse case-insensitively (`"de"`, `"DE"`) and display upper-case,
/// which is also how they appear in dataset file names.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Language {
  En,
  De,
  Es,
  Fr,
  It,
  Pt,
  Ru,
  Sv,
}

impl Language {
  /// Parse a two-letter language code.
  pub fn from_code(code: &str) -> Result<Self> {
    Self::from_str(code.trim())
      .map_err(|_| Error::UnknownLanguage(code.to_owned()))
  }

  /// The upper-case language code, e.g. `"EN"`.
  pub fn code(self) -> &'static str { self.into() }

  /// English name of the language.
  pub fn name(self) -> &'static str {
    match self {
      Self::En => "English",
      Self::De => "German",
      Self::Es => "Spanish",
      Self::Fr => "French",
      Self::It => "Italian",
      Self::Pt => "Portuguese",
      Self::Ru => "Russian",
      Self::Sv => "Swedish",
    }
  }

  /// File name of this language's dataset, both packaged and materialized:
  /// `<CODE>LanguageData.sqlite`.
  pub fn dataset_file_name(self) -> String {
    format!("{}LanguageData.sqlite", self.code())
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn codes_parse_case_insensitively() {
    assert_eq!(Language::from_code("de").unwrap(), Language::De);
    assert_eq!(Language::from_code("SV").unwrap(), Language::Sv);
    assert_eq!(Language::from_code(" fr ").unwrap(), Language::Fr);
  }

  #[test]
  fn unknown_code_is_rejected() {
    let err = Language::from_code("xx").unwrap_err();
    assert!(matches!(err, Error::UnknownLanguage(ref c) if c == "xx"));
  }

  #[test]
  fn dataset_file_name_uses_upper_case_code() {
    assert_eq!(Language::En.dataset_file_name(), "ENLanguageData.sqlite");
    assert_eq!(Language::Pt.to_string(), "PT");
  }

  #[test]
  fn every_language_round_trips_through_its_code() {
    for lang in Language::iter() {
      assert_eq!(Language::from_code(lang.code()).unwrap(), lang);
    }
  }
}
