use crate::Point;

/// A lexical unit of a Handlebars template.
///
/// The lexer only separates literal text from mustache tags. Deciding what a
/// tag means (block open, `else`, close, partial...) is left to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
	/// A run of literal text, exactly as written in the source.
	Text { text: String, start: Point },
	/// `{{ body }}` or `{{{ body }}}`. The body excludes the delimiters.
	Mustache {
		body: String,
		triple: bool,
		start: Point,
	},
	/// `{{!-- value --}}`
	LongComment { value: String, start: Point },
	/// `{{{{name}}}} body {{{{/name}}}}`
	RawBlock {
		name: String,
		body: String,
		start: Point,
		body_start: Point,
	},
}

impl TemplateToken {
	/// Where the token begins in the source.
	pub fn start(&self) -> Point {
		match self {
			Self::Text { start, .. }
			| Self::Mustache { start, .. }
			| Self::LongComment { start, .. }
			| Self::RawBlock { start, .. } => *start,
		}
	}
}

/// The meaning of a `{{ ... }}` tag once its body has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
	/// `{{#name}}`, `{{#> name}}`, `{{#*inline}}`
	OpenBlock(String),
	/// `{{^name}}`
	OpenInverse(String),
	/// `{{else}}` or `{{^}}`
	Else,
	/// `{{else if cond}}` and friends.
	ChainedElse(String),
	/// `{{/name}}`
	Close(String),
	/// `{{> name}}`
	Partial(String),
	/// `{{! value}}`
	Comment(String),
	/// Any other expression.
	Expression(String),
}

impl TagKind {
	/// Classify the body of a double-stash tag.
	pub fn classify(body: &str) -> Self {
		let body = strip_whitespace_control(body);

		if let Some(value) = body.strip_prefix('!') {
			return Self::Comment(value.to_string());
		}

		if let Some(rest) = body.strip_prefix('#') {
			let rest = rest
				.strip_prefix('>')
				.or_else(|| rest.strip_prefix('*'))
				.unwrap_or(rest);
			return Self::OpenBlock(first_word(rest));
		}

		if let Some(rest) = body.strip_prefix('^') {
			let name = first_word(rest);
			return if name.is_empty() {
				Self::Else
			} else {
				Self::OpenInverse(name)
			};
		}

		if let Some(rest) = body.strip_prefix('/') {
			return Self::Close(first_word(rest));
		}

		if let Some(rest) = body.strip_prefix('>') {
			return Self::Partial(first_word(rest));
		}

		if body == "else" {
			return Self::Else;
		}

		if let Some(rest) = body.strip_prefix("else") {
			if rest.starts_with(char::is_whitespace) {
				return Self::ChainedElse(rest.trim().to_string());
			}
		}

		Self::Expression(body.to_string())
	}
}

/// Trim surrounding whitespace and the `~` whitespace-control markers.
fn strip_whitespace_control(body: &str) -> &str {
	let body = body.trim();
	let body = body.strip_prefix('~').unwrap_or(body);
	let body = body.strip_suffix('~').unwrap_or(body);
	body.trim()
}

fn first_word(rest: &str) -> String {
	rest.split_whitespace().next().unwrap_or("").to_string()
}
