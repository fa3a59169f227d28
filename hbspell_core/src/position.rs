use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

/// A location in a template source.
///
/// Lines are 1-indexed and columns are 0-indexed, the same convention the
/// Handlebars parser uses for `firstLine` / `firstColumn`. Columns count
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
}

impl Default for Point {
	fn default() -> Self {
		Self { line: 1, column: 0 }
	}
}

impl Point {
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}

	/// Move past a single character.
	pub fn advance(&mut self, ch: char) {
		if ch == '\n' {
			self.line += 1;
			self.column = 0;
		} else {
			self.column += 1;
		}
	}

	/// Move past every character in `slice`.
	pub fn advance_str(&mut self, slice: &str) {
		for ch in slice.chars() {
			self.advance(ch);
		}
	}
}

impl Display for Point {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}
