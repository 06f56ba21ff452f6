//! Core types and trait definitions for the Scribe lexicon store.
//!
//! This crate is deliberately free of database dependencies. Storage backends
//! (e.g. `scribe-store-sqlite`) implement [`store::LexiconStore`]; callers
//! depend on the trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod grammar;
pub mod language;
pub mod schema;
pub mod sentinel;
pub mod store;

pub use error::{Error, Result};
pub use language::Language;
pub use schema::{LexiconTable, VerbAttribute};
pub use store::LexiconStore;
