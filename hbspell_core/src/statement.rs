use derive_more::Deref;

use crate::Point;

/// A node of a parsed template.
///
/// Only [`Statement::Content`] and [`Statement::Block`] matter for text
/// extraction. The remaining shapes are kept so the tree mirrors the source,
/// and are skipped by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Statement {
	/// Literal template text, markup included.
	Content {
		/// The original source text of this run.
		text: String,
		/// 1-indexed line of the first character.
		line: usize,
		/// 0-indexed column of the first character.
		column: usize,
	},
	/// A block helper such as `{{#if}}...{{else}}...{{/if}}`.
	Block {
		name: String,
		/// The primary branch.
		program: Option<Vec<Statement>>,
		/// The alternate (`else`) branch.
		inverse: Option<Vec<Statement>>,
	},
	/// `{{expr}}`, `{{{expr}}}` or `{{&expr}}`.
	Mustache { expression: String },
	/// `{{> partial}}`
	Partial { name: String },
	/// `{{! ... }}` or `{{!-- ... --}}`
	Comment { value: String },
}

impl Statement {
	pub fn content(text: impl Into<String>, point: Point) -> Self {
		Self::Content {
			text: text.into(),
			line: point.line,
			column: point.column,
		}
	}

	/// The position of the first character for content statements.
	pub fn start(&self) -> Option<Point> {
		match self {
			Self::Content { line, column, .. } => Some(Point::new(*line, *column)),
			_ => None,
		}
	}
}

/// The root of a parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Template {
	#[deref]
	pub statements: Vec<Statement>,
}

impl Template {
	pub fn new(statements: Vec<Statement>) -> Self {
		Self { statements }
	}
}
