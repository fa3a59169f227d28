use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use hbspell_core::SpellError;
use hbspell_core::SpellOracle;
use hbspell_core::SpellResult;
use hbspell_core::Verdict;

/// Words further than this from every dictionary entry get no suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// A spell checker backed by plain word lists.
///
/// Lists hold one word per line. Blank lines and lines starting with `#` are
/// ignored, and hunspell-style affix flags (`word/FLAGS`) are dropped.
#[derive(Debug)]
pub struct WordListOracle {
	words: HashSet<String>,
	max_suggestions: usize,
}

impl WordListOracle {
	pub fn new(max_suggestions: usize) -> Self {
		Self {
			words: HashSet::new(),
			max_suggestions,
		}
	}

	pub fn from_words<I, S>(words: I, max_suggestions: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut oracle = Self::new(max_suggestions);
		oracle.extend(words);
		oracle
	}

	/// Load every list in `paths`, then accept `extra` words on top.
	pub fn from_paths(
		paths: &[PathBuf],
		extra: &[String],
		max_suggestions: usize,
	) -> SpellResult<Self> {
		let mut oracle = Self::new(max_suggestions);
		for path in paths {
			oracle.load(path)?;
		}
		oracle.extend(extra.iter().cloned());
		Ok(oracle)
	}

	pub fn load(&mut self, path: &Path) -> SpellResult<()> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			SpellError::Dictionary {
				path: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;

		let before = self.words.len();
		for line in content.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let entry = line.split('/').next().unwrap_or(line);
			self.words.insert(entry.to_string());
		}

		tracing::debug!(
			path = %path.display(),
			added = self.words.len() - before,
			"loaded word list"
		);
		Ok(())
	}

	pub fn extend<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.words.extend(words.into_iter().map(Into::into));
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn is_correct(&self, word: &str) -> bool {
		let word = word.trim_matches('\'');
		if word.is_empty() || word.chars().all(|ch| ch.is_ascii_digit()) {
			return true;
		}

		if self.is_known(word) {
			return true;
		}

		word.strip_suffix("'s")
			.is_some_and(|stem| !stem.is_empty() && self.is_known(stem))
	}

	fn is_known(&self, word: &str) -> bool {
		if self.words.contains(word) {
			return true;
		}

		match Casing::of(word) {
			Casing::Capitalised | Casing::Upper => self.words.contains(&word.to_lowercase()),
			Casing::Lower | Casing::Mixed => false,
		}
	}

	/// Dictionary entries closest to `word`, nearest first.
	pub fn suggest(&self, word: &str) -> Vec<String> {
		let word = word.trim_matches('\'');
		let casing = Casing::of(word);
		let target = match casing {
			Casing::Capitalised | Casing::Upper => word.to_lowercase(),
			Casing::Lower | Casing::Mixed => word.to_string(),
		};
		let target_len = target.chars().count();

		let mut candidates: Vec<(usize, &str)> = self
			.words
			.iter()
			.filter(|entry| entry.chars().count().abs_diff(target_len) <= MAX_SUGGESTION_DISTANCE)
			.map(|entry| (levenshtein_distance(&target, entry), entry.as_str()))
			.filter(|(distance, _)| *distance > 0 && *distance <= MAX_SUGGESTION_DISTANCE)
			.collect();
		candidates.sort_unstable();

		let mut suggestions: Vec<String> = vec![];
		for (_, entry) in candidates {
			if suggestions.len() >= self.max_suggestions {
				break;
			}
			let suggestion = casing.apply(entry);
			if suggestion != word && !suggestions.contains(&suggestion) {
				suggestions.push(suggestion);
			}
		}

		suggestions
	}
}

impl SpellOracle for WordListOracle {
	fn check(&self, word: &str) -> SpellResult<Verdict> {
		if self.is_correct(word) {
			return Ok(Verdict::correct());
		}

		Ok(Verdict::incorrect(self.suggest(word)))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
	Lower,
	/// First letter uppercase, the rest lowercase.
	Capitalised,
	Upper,
	Mixed,
}

impl Casing {
	fn of(word: &str) -> Self {
		let mut letters = word.chars().filter(|ch| ch.is_alphabetic());
		let Some(first) = letters.next() else {
			return Self::Lower;
		};
		let rest: Vec<char> = letters.collect();

		if first.is_lowercase() {
			if rest.iter().all(|ch| ch.is_lowercase()) {
				Self::Lower
			} else {
				Self::Mixed
			}
		} else if rest.iter().all(|ch| ch.is_lowercase()) {
			Self::Capitalised
		} else if rest.iter().all(|ch| ch.is_uppercase()) {
			Self::Upper
		} else {
			Self::Mixed
		}
	}

	fn apply(self, entry: &str) -> String {
		match self {
			Self::Capitalised => {
				let mut chars = entry.chars();
				match chars.next() {
					Some(first) => first.to_uppercase().chain(chars).collect(),
					None => String::new(),
				}
			}
			Self::Upper => entry.to_uppercase(),
			Self::Lower | Self::Mixed => entry.to_string(),
		}
	}
}

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();

	if a.is_empty() {
		return b.len();
	}
	if b.is_empty() {
		return a.len();
	}

	let mut prev_row: Vec<usize> = (0..=b.len()).collect();
	let mut curr_row = vec![0; b.len() + 1];

	for (i, a_char) in a.iter().enumerate() {
		curr_row[0] = i + 1;
		for (j, b_char) in b.iter().enumerate() {
			let cost = usize::from(a_char != b_char);
			curr_row[j + 1] = (prev_row[j + 1] + 1)
				.min(curr_row[j] + 1)
				.min(prev_row[j] + cost);
		}
		std::mem::swap(&mut prev_row, &mut curr_row);
	}

	prev_row[b.len()]
}
