//! `hbspell_core` finds the prose inside Handlebars templates and checks its
//! spelling. Template logic, HTML tags, attribute values, entity references
//! and the bodies of `<script>` / `<style>` elements are never mistaken for
//! words, and every word keeps the line and column it has in the original
//! template.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Handlebars template
//!   → Parser (statement tree: content runs and blocks with their branches)
//!   → Text extractor (position markers interleaved with literal characters)
//!   → Markup tokenizer (state machine over tags, skipped elements and entities)
//!   → Oracle matching (every word checked concurrently, corrections reported)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `hbspell.toml`: dictionaries,
//!   template patterns, exclusions and skipped elements.
//! - [`project`]: Template discovery and reading.
//!
//! ## Key Types
//!
//! - [`Statement`]: A node of the parsed template.
//! - [`Fragment`]: A position marker or a single character of template text.
//! - [`WordToken`]: A located word.
//! - [`SpellOracle`]: Anything that can judge a word, such as a dictionary.
//! - [`Correction`]: A misspelled word with suggested replacements.
//!
//! ## Quick Start
//!
//! ```rust
//! use hbspell_core::all_words;
//!
//! let words = all_words("{{#if user}}Helo <b>{{user}}</b>{{/if}}", "greeting.hbs").unwrap();
//! assert_eq!(words[0].word, "Helo");
//! assert_eq!((words[0].line, words[0].column), (1, 12));
//! ```

pub use error::*;
pub use extract::*;
pub use oracle::*;
pub use parser::*;
pub use pipeline::*;
pub use position::*;
pub use statement::*;
pub use tokenizer::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod extract;
pub(crate) mod lexer;
mod oracle;
mod parser;
mod pipeline;
mod position;
pub mod project;
mod statement;
mod tokenizer;
pub(crate) mod tokens;

#[cfg(test)]
mod __fixtures;
