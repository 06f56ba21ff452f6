//! `scribe`: query and maintain Scribe keyboard lexicon datasets.
//!
//! # Usage
//!
//! ```
//! scribe --language de autocomplete Hau
//! scribe verb gehen pastParticiple auxiliaryVerb
//! scribe --json translate Haus
//! scribe import new-words.txt && scribe dedupe
//! ```
//!
//! Dataset locations come from `scribe.toml` (or `--config`) and `SCRIBE_*`
//! environment variables.

mod commands;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scribe_core::{Language, VerbAttribute};
use settings::ScribeConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Scribe keyboard lexicon tool")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "scribe.toml")]
  config: PathBuf,

  /// Language code of the dataset to use (overrides the config file).
  #[arg(short, long, global = true, value_parser = Language::from_code)]
  language: Option<Language>,

  /// Print results as a JSON array, `[""]` when nothing matched.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Up to three lexicon words starting with PREFIX.
  Autocomplete { prefix: String },
  /// Follow-up word suggestions for WORD.
  Suggest { word: String },
  /// Emoji suggestions for WORD.
  Emoji { word: String },
  /// Grammatical form of a noun.
  NounForm { word: String },
  /// Plural of a noun.
  Plural { word: String },
  /// Case governed by a preposition.
  Preposition { word: String },
  /// Translation of WORD.
  Translate { word: String },
  /// Selected forms of a verb, e.g. `verb go pastSimp pastPart`.
  Verb {
    verb:       String,
    #[arg(required = true, value_parser = VerbAttribute::from_column)]
    attributes: Vec<VerbAttribute>,
  },
  /// Add words to the autocomplete lexicon.
  Add {
    #[arg(required = true)]
    words: Vec<String>,
  },
  /// Add every non-blank line of FILE to the autocomplete lexicon.
  Import { file: PathBuf },
  /// Remove duplicate words from the autocomplete lexicon.
  Dedupe,
  /// Row counts of every dataset table.
  Stats,
  /// Create an empty dataset with the full schema at PATH.
  Init { path: PathBuf },
  /// Print a grammar JSON resource.
  Grammar { name: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so results on stdout stay machine-readable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ScribeConfig::load(&cli.config)?;
  commands::run(cli, cfg).await
}
