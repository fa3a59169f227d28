use hbspell_core::SpellError;
use hbspell_core::SpellOracle;
use hbspell_core::SpellResult;
use hbspell_core::Verdict;
use rstest::rstest;
use similar_asserts::assert_eq;

use super::*;

fn oracle() -> WordListOracle {
	WordListOracle::from_words(
		["hello", "help", "world", "word", "template", "it", "NASA", "Handlebars"],
		5,
	)
}

#[rstest]
#[case::exact("hello")]
#[case::capitalised("Hello")]
#[case::all_caps("WORLD")]
#[case::proper_noun("Handlebars")]
#[case::acronym("NASA")]
#[case::possessive("template's")]
#[case::capitalised_possessive("World's")]
#[case::quoted("'hello'")]
#[case::number("2024")]
#[case::only_apostrophes("''")]
fn accepts_known_words(#[case] word: &str) {
	assert!(oracle().is_correct(word), "{word} should be accepted");
}

#[rstest]
#[case::typo("helo")]
#[case::lowercase_proper_noun("handlebars")]
#[case::mixed_case("hElLo")]
#[case::unknown_possessive("wrold's")]
#[case::bare_suffix("'s")]
fn rejects_unknown_words(#[case] word: &str) {
	assert!(!oracle().is_correct(word), "{word} should be rejected");
}

#[test]
fn suggestions_are_ranked_by_distance_then_name() {
	assert_eq!(oracle().suggest("helo"), vec!["hello", "help"]);
	assert_eq!(oracle().suggest("wrold"), vec!["word", "world"]);
}

#[test]
fn suggestions_follow_the_word_casing() {
	assert_eq!(oracle().suggest("Helo"), vec!["Hello", "Help"]);
	assert_eq!(oracle().suggest("WROLD"), vec!["WORD", "WORLD"]);
}

#[test]
fn suggestions_are_capped() {
	let oracle = WordListOracle::from_words(["cat", "bat", "hat", "mat", "rat"], 2);
	assert_eq!(oracle.suggest("zat"), vec!["bat", "cat"]);
}

#[test]
fn no_suggestions_for_distant_words() {
	assert!(oracle().suggest("xylophone").is_empty());
}

#[test]
fn check_returns_verdicts() -> SpellResult<()> {
	let oracle = oracle();
	assert_eq!(oracle.check("world")?, Verdict::correct());
	assert_eq!(
		oracle.check("wrold")?,
		Verdict::incorrect(vec!["word".into(), "world".into()])
	);

	Ok(())
}

#[test]
fn loads_word_lists() -> SpellResult<()> {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	let list = tmp.path().join("words.txt");
	std::fs::write(&list, "# project words\nhello\n\n  world  \nrun/SGD\n")
		.unwrap_or_else(|e| panic!("write: {e}"));

	let oracle = WordListOracle::from_paths(&[list], &["hbspell".to_string()], 5)?;
	assert_eq!(oracle.len(), 4);
	assert!(oracle.is_correct("world"));
	assert!(oracle.is_correct("run"));
	assert!(oracle.is_correct("hbspell"));
	assert!(!oracle.is_correct("project"));

	Ok(())
}

#[test]
fn missing_word_list_errors() {
	let result = WordListOracle::from_paths(&["/definitely/not/here.txt".into()], &[], 5);
	assert!(matches!(
		result,
		Err(SpellError::Dictionary { ref path, .. }) if path == "/definitely/not/here.txt"
	));
}

#[test]
fn empty_oracle_rejects_words() {
	let oracle = WordListOracle::new(5);
	assert!(oracle.is_empty());
	assert!(!oracle.is_correct("anything"));
	assert!(oracle.suggest("anything").is_empty());
}

#[test]
fn levenshtein_identical() {
	assert_eq!(levenshtein_distance("hello", "hello"), 0);
}

#[test]
fn levenshtein_empty() {
	assert_eq!(levenshtein_distance("", "hello"), 5);
	assert_eq!(levenshtein_distance("hello", ""), 5);
	assert_eq!(levenshtein_distance("", ""), 0);
}

#[test]
fn levenshtein_edits() {
	assert_eq!(levenshtein_distance("helo", "hello"), 1);
	assert_eq!(levenshtein_distance("wrold", "world"), 2);
	assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
}

#[test]
fn levenshtein_counts_characters() {
	assert_eq!(levenshtein_distance("caf\u{e9}", "cafe"), 1);
	assert_eq!(levenshtein_distance("na\u{ef}ve", "naive"), 1);
}
