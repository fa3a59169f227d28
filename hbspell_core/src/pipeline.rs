use std::sync::Arc;

use crate::Correction;
use crate::MatchSummary;
use crate::SpellOracle;
use crate::SpellResult;
use crate::TokenizerOptions;
use crate::WordToken;
use crate::extract_text;
use crate::find_corrections;
use crate::parse_template;
use crate::tokenize_with_options;

/// Every word in the prose of a template, in document order.
pub fn all_words(template: &str, source: &str) -> SpellResult<Vec<WordToken>> {
	all_words_with_options(template, source, &TokenizerOptions::default())
}

pub fn all_words_with_options(
	template: &str,
	source: &str,
	options: &TokenizerOptions,
) -> SpellResult<Vec<WordToken>> {
	let template = parse_template(template)?;
	let fragments = extract_text(&template);
	Ok(tokenize_with_options(fragments, source, options))
}

/// Spell-check a template, reporting each misspelled word to
/// `on_correction` as soon as its verdict arrives.
pub async fn check_template<O, F>(
	template: &str,
	source: &str,
	oracle: Arc<O>,
	options: &TokenizerOptions,
	on_correction: F,
) -> SpellResult<MatchSummary>
where
	O: SpellOracle + ?Sized + 'static,
	F: FnMut(Correction),
{
	let words = all_words_with_options(template, source, options)?;
	find_corrections(oracle, words, on_correction).await
}
