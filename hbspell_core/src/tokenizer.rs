use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

use crate::Fragment;
use crate::Point;

/// Element names whose bodies never contain prose.
pub const DEFAULT_SKIP_TAGS: [&str; 2] = ["script", "style"];

/// A word found in template prose, located in the original template source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordToken {
	/// The word, with typographic apostrophes replaced by `'`.
	pub word: String,
	/// 1-indexed line of the first character.
	pub line: usize,
	/// 0-indexed column of the first character.
	pub column: usize,
	/// Where the template came from, usually a file path.
	pub source: String,
}

impl WordToken {
	pub fn position(&self) -> Point {
		Point::new(self.line, self.column)
	}
}

impl Display for WordToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{} {}", self.source, self.line, self.column, self.word)
	}
}

/// States of the markup state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagState {
	/// Reading prose.
	#[default]
	OutsideTags,
	/// Just read `<`, collecting the tag name.
	TagOpen,
	/// Inside the body of a skipped element such as `<script>`.
	SkippedBody,
	/// Read `<` inside a skipped body.
	SkippedBodyClosing,
	/// Read `</` inside a skipped body, collecting the closing tag name.
	/// Only the name of the element being skipped ends the body.
	SkippedCloseTag,
	/// Inside the opening tag of a skipped element, e.g. `<script src="">`.
	InsideSkippedTag,
	/// Inside an ordinary tag, after its name.
	InsideTags,
	/// Inside an entity reference within a tag.
	EntityInside,
	/// Inside an entity reference within prose.
	EntityOutside,
}

/// How the state machine sees a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
	/// ASCII letters and digits, `'` and `’`.
	Alphanum,
	/// `<`
	OpenAngle,
	/// `>`
	CloseAngle,
	/// `&`
	Ampersand,
	Other,
}

impl CharClass {
	/// Classify a character, returning the canonical form to buffer.
	///
	/// The typographic right single quote (`’`, U+2019) becomes an ASCII
	/// apostrophe so spell checkers only ever see one kind.
	pub fn of(ch: char) -> (Self, char) {
		match ch {
			'\u{2019}' => (Self::Alphanum, '\''),
			'\'' => (Self::Alphanum, ch),
			ch if ch.is_ascii_alphanumeric() => (Self::Alphanum, ch),
			'<' => (Self::OpenAngle, ch),
			'>' => (Self::CloseAngle, ch),
			'&' => (Self::Ampersand, ch),
			_ => (Self::Other, ch),
		}
	}
}

/// What a transition asks the tokenizer to do with its pending buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
	None,
	/// Append the character to the pending word.
	Buffer(char),
	/// End the pending word.
	Flush,
	/// The pending buffer holds a tag name. Clear it, and move to `skipped`
	/// instead of the step's `next` state when it names a skipped element.
	ResolveTag { skipped: TagState },
	/// The pending buffer holds the name of a closing tag inside a skipped
	/// body. Clear it, and move to `matched` instead of the step's `next`
	/// state when it closes the skipped element.
	ResolveClose { matched: TagState },
}

/// The outcome of feeding one character to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
	pub next: TagState,
	pub emission: Emission,
}

impl Step {
	fn to(next: TagState) -> Self {
		Self {
			next,
			emission: Emission::None,
		}
	}

	fn with(next: TagState, emission: Emission) -> Self {
		Self { next, emission }
	}
}

/// The markup state machine's transition function.
///
/// `ch` must already be canonicalized by [`CharClass::of`].
#[allow(clippy::enum_glob_use)]
pub fn transition(state: TagState, ch: char, class: CharClass) -> Step {
	use CharClass::*;
	use TagState::*;

	match (state, class) {
		(OutsideTags, Alphanum) => Step::with(OutsideTags, Emission::Buffer(ch)),
		(OutsideTags, OpenAngle) => Step::with(TagOpen, Emission::Flush),
		(OutsideTags, CloseAngle) => Step::to(OutsideTags),
		(OutsideTags, Ampersand) => Step::with(EntityOutside, Emission::Flush),
		(OutsideTags, Other) => Step::with(OutsideTags, Emission::Flush),

		(TagOpen, Alphanum) => Step::with(TagOpen, Emission::Buffer(ch)),
		(TagOpen, CloseAngle) => {
			Step::with(
				OutsideTags,
				Emission::ResolveTag {
					skipped: SkippedBody,
				},
			)
		}
		(TagOpen, _) => {
			Step::with(
				InsideTags,
				Emission::ResolveTag {
					skipped: InsideSkippedTag,
				},
			)
		}

		(SkippedBody | SkippedBodyClosing, OpenAngle) => Step::to(SkippedBodyClosing),
		(SkippedBody, _) => Step::to(SkippedBody),
		(SkippedBodyClosing, _) if ch == '/' => Step::to(SkippedCloseTag),
		(SkippedBodyClosing, _) => Step::to(SkippedBody),

		(SkippedCloseTag, Alphanum) => Step::with(SkippedCloseTag, Emission::Buffer(ch)),
		(SkippedCloseTag, CloseAngle) => {
			Step::with(
				SkippedBody,
				Emission::ResolveClose {
					matched: OutsideTags,
				},
			)
		}
		(SkippedCloseTag, OpenAngle) => {
			Step::with(
				SkippedBodyClosing,
				Emission::ResolveClose {
					matched: InsideTags,
				},
			)
		}
		(SkippedCloseTag, _) => {
			Step::with(
				SkippedBody,
				Emission::ResolveClose {
					matched: InsideTags,
				},
			)
		}

		(InsideSkippedTag, CloseAngle) => Step::to(SkippedBody),
		(InsideSkippedTag, _) => Step::to(InsideSkippedTag),

		(InsideTags, CloseAngle) => Step::to(OutsideTags),
		(InsideTags, Ampersand) => Step::to(EntityInside),
		(InsideTags, _) => Step::to(InsideTags),

		(EntityInside, _) if ch == ';' => Step::to(InsideTags),
		(EntityInside, _) => Step::to(EntityInside),

		(EntityOutside, _) if ch == ';' => Step::to(OutsideTags),
		(EntityOutside, _) => Step::to(EntityOutside),
	}
}

/// Options controlling how markup is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
	/// Element names whose bodies are skipped. Matched case-sensitively.
	pub skip_tags: Vec<String>,
}

impl Default for TokenizerOptions {
	fn default() -> Self {
		Self {
			skip_tags: DEFAULT_SKIP_TAGS.iter().map(ToString::to_string).collect(),
		}
	}
}

impl TokenizerOptions {
	pub fn is_skip_tag(&self, name: &str) -> bool {
		self.skip_tags.iter().any(|tag| tag == name)
	}
}

/// Reads extracted template text one fragment at a time and collects the
/// words found in its prose.
#[derive(Debug)]
pub struct Tokenizer<'a> {
	source: &'a str,
	options: &'a TokenizerOptions,
	state: TagState,
	/// Position of the next character.
	point: Point,
	/// Word characters read so far, or the tag name while in
	/// [`TagState::TagOpen`].
	pushback: String,
	/// Name of the element whose body is being skipped.
	skipped_tag: Option<String>,
	words: Vec<WordToken>,
}

impl<'a> Tokenizer<'a> {
	pub fn new(source: &'a str, options: &'a TokenizerOptions) -> Self {
		Self {
			source,
			options,
			state: TagState::default(),
			point: Point::default(),
			pushback: String::new(),
			skipped_tag: None,
			words: vec![],
		}
	}

	pub fn state(&self) -> TagState {
		self.state
	}

	pub fn point(&self) -> Point {
		self.point
	}

	pub fn feed(&mut self, fragment: Fragment) {
		match fragment {
			Fragment::Marker(point) => self.feed_marker(point),
			Fragment::Char(ch) => self.feed_char(ch),
		}
	}

	/// A marker landing exactly where the cursor already is continues the
	/// current run.
	fn feed_marker(&mut self, point: Point) {
		if point == self.point {
			return;
		}

		self.end_word();
		self.point = point;
	}

	fn feed_char(&mut self, ch: char) {
		if ch == '\n' {
			self.end_word();
			self.point.advance(ch);
			self.step(ch);
		} else {
			self.step(ch);
			self.point.advance(ch);
		}
	}

	fn step(&mut self, ch: char) {
		let (class, ch) = CharClass::of(ch);
		let step = transition(self.state, ch, class);

		let next = match step.emission {
			Emission::None => step.next,
			Emission::Buffer(ch) => {
				self.pushback.push(ch);
				step.next
			}
			Emission::Flush => {
				self.flush();
				step.next
			}
			Emission::ResolveTag { skipped } => {
				let name = std::mem::take(&mut self.pushback);
				if self.options.is_skip_tag(&name) {
					tracing::trace!(at = %self.point, tag = %name, "entering skipped element");
					self.skipped_tag = Some(name);
					skipped
				} else {
					step.next
				}
			}
			Emission::ResolveClose { matched } => {
				let name = std::mem::take(&mut self.pushback);
				if self.skipped_tag.as_deref() == Some(name.as_str()) {
					self.skipped_tag = None;
					matched
				} else {
					step.next
				}
			}
		};

		self.state = next;
	}

	/// Flush the pending word unless the buffer holds a tag name.
	fn end_word(&mut self) {
		if self.state == TagState::OutsideTags {
			self.flush();
		}
	}

	fn flush(&mut self) {
		if self.pushback.is_empty() {
			return;
		}

		let word = std::mem::take(&mut self.pushback);
		let length = word.chars().count();
		self.words.push(WordToken {
			word,
			line: self.point.line,
			column: self.point.column.saturating_sub(length),
			source: self.source.to_string(),
		});
	}

	/// End of input: flush any trailing word and return everything found.
	pub fn finish(mut self) -> Vec<WordToken> {
		self.end_word();
		self.words
	}
}

/// Collect the words in extracted template text using the default options.
pub fn tokenize(fragments: impl IntoIterator<Item = Fragment>, source: &str) -> Vec<WordToken> {
	tokenize_with_options(fragments, source, &TokenizerOptions::default())
}

/// Collect the words in extracted template text.
pub fn tokenize_with_options(
	fragments: impl IntoIterator<Item = Fragment>,
	source: &str,
	options: &TokenizerOptions,
) -> Vec<WordToken> {
	let mut tokenizer = Tokenizer::new(source, options);
	for fragment in fragments {
		tokenizer.feed(fragment);
	}

	let words = tokenizer.finish();
	tracing::debug!(source, words = words.len(), "tokenized template text");
	words
}
