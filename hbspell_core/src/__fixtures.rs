use std::collections::HashMap;
use std::time::Duration;

use crate::Fragment;
use crate::Point;
use crate::SpellError;
use crate::SpellOracle;
use crate::SpellResult;
use crate::Statement;
use crate::Verdict;
use crate::WordToken;

/// An oracle that rejects a fixed set of words.
#[derive(Debug, Default)]
pub struct StubOracle {
	misspelled: HashMap<String, Vec<String>>,
	delays: HashMap<String, Duration>,
	failing: Option<String>,
}

impl StubOracle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn misspelled(mut self, word: &str, suggestions: &[&str]) -> Self {
		self.misspelled.insert(
			word.to_string(),
			suggestions.iter().map(ToString::to_string).collect(),
		);
		self
	}

	/// Make the verdict for `word` arrive late.
	pub fn delayed(mut self, word: &str, millis: u64) -> Self {
		self.delays
			.insert(word.to_string(), Duration::from_millis(millis));
		self
	}

	pub fn failing_on(mut self, word: &str) -> Self {
		self.failing = Some(word.to_string());
		self
	}
}

impl SpellOracle for StubOracle {
	fn check(&self, word: &str) -> SpellResult<Verdict> {
		if let Some(delay) = self.delays.get(word) {
			std::thread::sleep(*delay);
		}

		if self.failing.as_deref() == Some(word) {
			return Err(SpellError::Oracle {
				word: word.to_string(),
				reason: "dictionary unavailable".to_string(),
			});
		}

		Ok(match self.misspelled.get(word) {
			Some(suggestions) => Verdict::incorrect(suggestions.clone()),
			None => Verdict::correct(),
		})
	}
}

pub fn word(text: &str, line: usize, column: usize) -> WordToken {
	WordToken {
		word: text.to_string(),
		line,
		column,
		source: "test.hbs".to_string(),
	}
}

pub fn content(text: &str, line: usize, column: usize) -> Statement {
	Statement::content(text, Point::new(line, column))
}

pub fn block(name: &str, program: Vec<Statement>, inverse: Option<Vec<Statement>>) -> Statement {
	Statement::Block {
		name: name.to_string(),
		program: Some(program),
		inverse,
	}
}

/// A single content run starting at the beginning of the template.
pub fn fragments(text: &str) -> Vec<Fragment> {
	runs(&[(text, Point::default())])
}

/// Several content runs, each preceded by its marker.
pub fn runs(runs: &[(&str, Point)]) -> Vec<Fragment> {
	runs.iter()
		.flat_map(|(text, point)| {
			std::iter::once(Fragment::Marker(*point)).chain(text.chars().map(Fragment::Char))
		})
		.collect()
}

/// `(word, line, column)` for every token, for compact assertions.
pub fn located(words: &[WordToken]) -> Vec<(&str, usize, usize)> {
	words
		.iter()
		.map(|token| (token.word.as_str(), token.line, token.column))
		.collect()
}

pub fn write_file(root: &std::path::Path, relative: &str, content: &str) {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create dir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
}
