use logos::Logos;

use crate::Point;
use crate::SpellError;
use crate::SpellResult;
use crate::tokens::TemplateToken;

/// Raw tokens produced by logos for flat tokenization of a template.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[token("\\{{")]
	EscapedOpen,
	#[token("{{{{")]
	RawOpen,
	#[token("}}}}")]
	RawClose,
	#[token("{{!--")]
	LongCommentOpen,
	#[token("--}}")]
	LongCommentClose,
	#[token("{{{")]
	TripleOpen,
	#[token("}}}")]
	TripleClose,
	#[token("{{")]
	Open,
	#[token("}}")]
	Close,
	#[regex(r"[^{}\\-]+")]
	Text,
	#[token("{")]
	#[token("}")]
	#[token("\\")]
	#[token("-")]
	Single,
}

impl RawToken {
	/// Number of closing braces a closing token contributes.
	fn closing_width(&self) -> Option<usize> {
		match self {
			Self::Close => Some(2),
			Self::TripleClose => Some(3),
			Self::RawClose => Some(4),
			_ => None,
		}
	}
}

/// Context states for the walker.
enum LexerContext {
	/// Literal text outside of any tag.
	Outside,
	/// Inside `{{` (width 2) or `{{{` (width 3).
	Tag { width: usize, start: Point },
	/// Inside `{{!-- ... --}}`.
	LongComment { start: Point },
	/// Inside the `{{{{name}}}}` opening of a raw block.
	RawTag { start: Point },
	/// Inside the body of a raw block, waiting for `{{{{/name}}}}`.
	RawBody {
		name: String,
		start: Point,
		body_start: Point,
	},
}

/// Walks the logos token stream, separating literal text from tags while
/// tracking the line and column of everything it emits.
struct TokenWalker<'a> {
	/// The template source.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, std::ops::Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	/// Position of the start of the current raw token.
	position: Point,
	/// Text accumulated for the current context.
	buffer: String,
	/// Where the accumulated text started.
	buffer_start: Point,
	context: LexerContext,
	tokens: Vec<TemplateToken>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			position: Point::default(),
			buffer: String::new(),
			buffer_start: Point::default(),
			context: LexerContext::Outside,
			tokens: vec![],
		}
	}

	/// Get the text slice for the raw token at `index`.
	fn slice_at(&self, index: usize) -> &'a str {
		let (_, span) = &self.raw_tokens[index];
		&self.source[span.clone()]
	}

	fn current_slice(&self) -> &'a str {
		self.slice_at(self.cursor)
	}

	fn advance_cursor(&mut self) {
		let slice = self.current_slice();
		self.position.advance_str(slice);
		self.cursor += 1;
	}

	/// Append the current slice to the buffer and move on.
	fn push_text(&mut self) {
		if self.buffer.is_empty() {
			self.buffer_start = self.position;
		}
		let slice = self.current_slice();
		self.buffer.push_str(slice);
		self.advance_cursor();
	}

	/// Append part of the current slice to the buffer, starting at `offset`
	/// characters in, then move on.
	fn push_text_tail(&mut self, offset: usize) {
		let slice = self.current_slice();
		let mut start = self.position;
		for ch in slice.chars().take(offset) {
			start.advance(ch);
		}
		let tail: String = slice.chars().skip(offset).collect();
		self.advance_cursor();

		if tail.is_empty() {
			return;
		}
		if self.buffer.is_empty() {
			self.buffer_start = start;
		}
		self.buffer.push_str(&tail);
	}

	/// Emit any accumulated literal text.
	fn flush_text(&mut self) {
		if self.buffer.is_empty() {
			return;
		}

		let text = std::mem::take(&mut self.buffer);
		self.tokens.push(TemplateToken::Text {
			text,
			start: self.buffer_start,
		});
	}

	/// Enter a new context whose buffer starts after the current token.
	fn enter(&mut self, context: LexerContext) {
		self.advance_cursor();
		self.buffer.clear();
		self.buffer_start = self.position;
		self.context = context;
	}

	/// When the `{{{{` at the cursor opens `{{{{/name}}}}`, the index of its
	/// `}}}}`. The name may span several raw tokens, e.g. `raw-helper`.
	fn closing_raw_block_end(&self, name: &str) -> Option<usize> {
		let mut closing = String::new();
		for index in self.cursor + 1..self.raw_tokens.len() {
			match &self.raw_tokens[index].0 {
				Ok(RawToken::RawClose) => {
					let matches = closing
						.trim()
						.strip_prefix('/')
						.is_some_and(|closing| closing.trim() == name);
					return matches.then_some(index);
				}
				Ok(RawToken::Text | RawToken::Single) | Err(()) => {
					closing.push_str(self.slice_at(index));
				}
				Ok(_) => return None,
			}
		}

		None
	}

	/// Whether the token after the cursor starts with a closing brace.
	fn next_starts_with_brace(&self) -> bool {
		self.cursor + 1 < self.raw_tokens.len() && self.slice_at(self.cursor + 1).starts_with('}')
	}

	fn process(&mut self) -> SpellResult<()> {
		while self.cursor < self.raw_tokens.len() {
			let (result, _) = &self.raw_tokens[self.cursor];

			// Bytes logos doesn't recognise are literal text in every context.
			let Ok(raw) = result else {
				self.push_text();
				continue;
			};

			match &self.context {
				LexerContext::Outside => {
					match raw {
						RawToken::Open => {
							self.flush_text();
							let start = self.position;
							self.enter(LexerContext::Tag { width: 2, start });
						}
						RawToken::TripleOpen => {
							self.flush_text();
							let start = self.position;
							self.enter(LexerContext::Tag { width: 3, start });
						}
						RawToken::LongCommentOpen => {
							self.flush_text();
							let start = self.position;
							self.enter(LexerContext::LongComment { start });
						}
						RawToken::RawOpen => {
							self.flush_text();
							let start = self.position;
							self.enter(LexerContext::RawTag { start });
						}
						// `\{{` stays in the text, backslash included, so
						// the content matches the source character for
						// character.
						_ => self.push_text(),
					}
				}
				LexerContext::Tag { width, start } => {
					let (width, start) = (*width, *start);
					match raw.closing_width() {
						Some(closing) if closing >= width => {
							let body = std::mem::take(&mut self.buffer);
							self.tokens.push(TemplateToken::Mustache {
								body,
								triple: width == 3,
								start,
							});
							self.context = LexerContext::Outside;
							// `{{name}}}` closes the tag and leaves a literal
							// `}` behind.
							self.push_text_tail(width);
						}
						// `{{name--}}` lexes its closer as `--}}`, and
						// `{{{name--}}}` as `--}}` followed by `}`.
						None if *raw == RawToken::LongCommentClose
							&& (width == 2 || self.next_starts_with_brace()) =>
						{
							let mut body = std::mem::take(&mut self.buffer);
							body.push_str("--");
							self.tokens.push(TemplateToken::Mustache {
								body,
								triple: width == 3,
								start,
							});
							self.context = LexerContext::Outside;
							self.advance_cursor();
							if width == 3 {
								self.push_text_tail(1);
							}
						}
						_ => {
							let slice = self.current_slice();
							self.buffer.push_str(slice);
							self.advance_cursor();
						}
					}
				}
				LexerContext::LongComment { start } => {
					let start = *start;
					if *raw == RawToken::LongCommentClose {
						let value = std::mem::take(&mut self.buffer);
						self.tokens
							.push(TemplateToken::LongComment { value, start });
						self.context = LexerContext::Outside;
						self.advance_cursor();
					} else {
						let slice = self.current_slice();
						self.buffer.push_str(slice);
						self.advance_cursor();
					}
				}
				LexerContext::RawTag { start } => {
					let start = *start;
					if *raw == RawToken::RawClose {
						let name = self.buffer.trim().to_string();
						self.enter(LexerContext::RawBody {
							name,
							start,
							body_start: Point::default(),
						});
						if let LexerContext::RawBody { body_start, .. } = &mut self.context {
							*body_start = self.position;
						}
					} else {
						let slice = self.current_slice();
						self.buffer.push_str(slice);
						self.advance_cursor();
					}
				}
				LexerContext::RawBody {
					name,
					start,
					body_start,
				} => {
					let end = match raw {
						RawToken::RawOpen => self.closing_raw_block_end(name),
						_ => None,
					};
					if let Some(end) = end {
						let token = TemplateToken::RawBlock {
							name: name.clone(),
							body: std::mem::take(&mut self.buffer),
							start: *start,
							body_start: *body_start,
						};
						self.tokens.push(token);
						self.context = LexerContext::Outside;
						while self.cursor <= end {
							self.advance_cursor();
						}
					} else {
						let slice = self.current_slice();
						self.buffer.push_str(slice);
						self.advance_cursor();
					}
				}
			}
		}

		self.finish()
	}

	fn finish(&mut self) -> SpellResult<()> {
		let unterminated = match &self.context {
			LexerContext::Outside => None,
			LexerContext::Tag { width: 3, start } => Some(("{{{", *start)),
			LexerContext::Tag { start, .. } => Some(("{{", *start)),
			LexerContext::LongComment { start } => Some(("{{!--", *start)),
			LexerContext::RawTag { start } | LexerContext::RawBody { start, .. } => {
				Some(("{{{{", *start))
			}
		};

		if let Some((opening, start)) = unterminated {
			return Err(SpellError::UnterminatedTag {
				opening: opening.to_string(),
				line: start.line,
				column: start.column,
			});
		}

		self.flush_text();
		Ok(())
	}
}

/// Split a template into literal text runs and tags.
pub fn tokenize_template(source: &str) -> SpellResult<Vec<TemplateToken>> {
	let mut walker = TokenWalker::new(source);
	walker.process()?;
	Ok(walker.tokens)
}
