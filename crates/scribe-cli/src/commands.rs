//! Subcommand dispatch.

use std::path::Path;

use anyhow::Context as _;
use scribe_core::{
  Language, LexiconStore as _, grammar::load_grammar, sentinel::sentinel,
};
use scribe_store_sqlite::{DatasetInstaller, LexiconSession, SqliteLexicon};

use crate::{Cli, Command, settings::ScribeConfig};

pub async fn run(cli: Cli, cfg: ScribeConfig) -> anyhow::Result<()> {
  match cli.command {
    Command::Init { path } => init(&path).await,
    Command::Grammar { name } => {
      let doc = load_grammar(cfg.grammar_dir(), &name)?;
      println!("{}", serde_json::to_string_pretty(&doc)?);
      Ok(())
    }
    command => with_dataset(command, cli.language, cli.json, &cfg).await,
  }
}

/// Run a command against the configured language's dataset.
async fn with_dataset(
  command: Command,
  language: Option<Language>,
  json: bool,
  cfg: &ScribeConfig,
) -> anyhow::Result<()> {
  let language = match language {
    Some(language) => language,
    None => Language::from_code(&cfg.language)
      .context("invalid `language` in configuration")?,
  };

  let session = LexiconSession::new(DatasetInstaller::new(
    &cfg.packaged_dir,
    &cfg.session_dir,
  ));
  let store = session
    .switch_to(language)
    .await
    .with_context(|| format!("failed to open {} dataset", language.name()))?;

  match command {
    Command::Autocomplete { prefix } => {
      print_lookup(store.autocompletions(&prefix).await, json)?;
    }
    Command::Suggest { word } => {
      print_lookup(store.autosuggestions(&word).await, json)?;
    }
    Command::Emoji { word } => {
      print_lookup(store.emojis(&word).await, json)?;
    }
    Command::NounForm { word } => {
      print_lookup(store.noun_form(&word).await, json)?;
    }
    Command::Plural { word } => {
      print_lookup(store.noun_plural(&word).await, json)?;
    }
    Command::Preposition { word } => {
      print_lookup(store.preposition_form(&word).await, json)?;
    }
    Command::Translate { word } => {
      print_lookup(store.translation(&word).await, json)?;
    }
    Command::Verb { verb, attributes } => {
      print_lookup(store.verb_forms(&verb, &attributes).await, json)?;
    }
    Command::Add { words } => {
      let added = store.insert_autocomplete_entries(words).await;
      println!("added {added} word(s)");
    }
    Command::Import { file } => {
      let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
      let words: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
      let total = words.len();
      let added = store.insert_autocomplete_entries(words).await;
      println!("added {added} of {total} word(s)");
    }
    Command::Dedupe => {
      let removed = store.deduplicate_autocomplete_entries().await;
      println!("removed {removed} duplicate row(s)");
    }
    Command::Stats => {
      let stats = store.stats().await?;
      for (table, count) in &stats.counts {
        match count {
          Some(n) => println!("{:<22} {n}", table.table_name()),
          None => println!("{:<22} unavailable", table.table_name()),
        }
      }
    }
    Command::Init { .. } | Command::Grammar { .. } => {}
  }

  session.close().await;
  Ok(())
}

async fn init(path: &Path) -> anyhow::Result<()> {
  SqliteLexicon::create(path)
    .await
    .with_context(|| format!("failed to create dataset at {}", path.display()))?;
  println!("created {}", path.display());
  Ok(())
}

fn print_lookup(result: Option<Vec<String>>, json: bool) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string(&sentinel(result))?);
    return Ok(());
  }
  match result {
    Some(values) => {
      for value in values {
        println!("{value}");
      }
    }
    None => eprintln!("no match"),
  }
  Ok(())
}
