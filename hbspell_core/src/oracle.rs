use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::SpellError;
use crate::SpellResult;
use crate::WordToken;

/// A spell checker's answer for a single word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
	pub correct: bool,
	/// Replacements in the order the checker ranks them.
	pub suggestions: Vec<String>,
}

impl Verdict {
	pub fn correct() -> Self {
		Self {
			correct: true,
			suggestions: vec![],
		}
	}

	pub fn incorrect(suggestions: Vec<String>) -> Self {
		Self {
			correct: false,
			suggestions,
		}
	}
}

/// Decides whether a word is spelled correctly.
///
/// Implementations are queried from many blocking tasks at once, so they
/// must be safe to share. An error is fatal for the whole run.
pub trait SpellOracle: Send + Sync {
	fn check(&self, word: &str) -> SpellResult<Verdict>;
}

/// A misspelled word and what to replace it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
	/// The word as it appears in the template.
	pub original: String,
	pub suggestions: Vec<String>,
	/// 1-indexed line of the word's first character.
	pub line: usize,
	/// 0-indexed column of the word's first character.
	pub column: usize,
	pub source: String,
}

impl Correction {
	pub fn from_word(word: WordToken, suggestions: Vec<String>) -> Self {
		Self {
			original: word.word,
			suggestions,
			line: word.line,
			column: word.column,
			source: word.source,
		}
	}
}

/// Totals for one run of [`find_corrections`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
	/// Words that received a verdict.
	pub checked: usize,
	/// Words reported as misspelled.
	pub corrections: usize,
}

impl MatchSummary {
	pub fn is_clean(&self) -> bool {
		self.corrections == 0
	}
}

/// Check every word against `oracle` concurrently.
///
/// Each word is checked on its own blocking task and `on_correction` is
/// called, in completion order, for every word the oracle rejects. The
/// returned future resolves once, after every word has a verdict; with no
/// words it resolves immediately. The first oracle error cancels the
/// remaining checks and is returned.
pub async fn find_corrections<O, F>(
	oracle: Arc<O>,
	words: Vec<WordToken>,
	mut on_correction: F,
) -> SpellResult<MatchSummary>
where
	O: SpellOracle + ?Sized + 'static,
	F: FnMut(Correction),
{
	let mut summary = MatchSummary::default();
	let mut tasks = JoinSet::new();

	for word in words {
		let oracle = Arc::clone(&oracle);
		tasks.spawn_blocking(move || {
			let verdict = oracle.check(&word.word);
			(word, verdict)
		});
	}

	tracing::debug!(words = tasks.len(), "dispatched words to the spell checker");

	while let Some(joined) = tasks.join_next().await {
		let (word, verdict) = joined.map_err(|e| SpellError::OracleTask(e.to_string()))?;

		let verdict = match verdict {
			Ok(verdict) => verdict,
			Err(error) => {
				tasks.abort_all();
				return Err(error);
			}
		};

		summary.checked += 1;
		if !verdict.correct {
			summary.corrections += 1;
			on_correction(Correction::from_word(word, verdict.suggestions));
		}
	}

	Ok(summary)
}

/// Like [`find_corrections`], collecting the corrections in completion
/// order.
pub async fn collect_corrections<O>(
	oracle: Arc<O>,
	words: Vec<WordToken>,
) -> SpellResult<Vec<Correction>>
where
	O: SpellOracle + ?Sized + 'static,
{
	let mut corrections = vec![];
	find_corrections(oracle, words, |correction| corrections.push(correction)).await?;
	Ok(corrections)
}
