use crate::Point;
use crate::SpellError;
use crate::SpellResult;
use crate::Statement;
use crate::Template;
use crate::lexer::tokenize_template;
use crate::tokens::TagKind;
use crate::tokens::TemplateToken;

/// Parse a Handlebars template into its statement tree.
///
/// Only the structure needed to find literal text is recovered: content runs
/// with their positions, and blocks with their primary and `else` branches.
/// Expressions are kept as opaque strings.
pub fn parse_template(source: impl AsRef<str>) -> SpellResult<Template> {
	let source = normalize_line_endings(source.as_ref());
	let tokens = tokenize_template(&source)?;
	build_template(tokens)
}

/// Build the statement tree from already-tokenized template input.
pub(crate) fn build_template(tokens: Vec<TemplateToken>) -> SpellResult<Template> {
	let mut root: Vec<Statement> = vec![];
	let mut stack: Vec<BlockFrame> = vec![];

	for token in tokens {
		match token {
			TemplateToken::Text { text, start } => {
				push_statement(&mut root, &mut stack, Statement::content(text, start));
			}
			TemplateToken::LongComment { value, .. } => {
				push_statement(&mut root, &mut stack, Statement::Comment { value });
			}
			TemplateToken::RawBlock {
				name,
				body,
				body_start,
				..
			} => {
				let program = if body.is_empty() {
					vec![]
				} else {
					vec![Statement::content(body, body_start)]
				};
				let block = Statement::Block {
					name,
					program: Some(program),
					inverse: None,
				};
				push_statement(&mut root, &mut stack, block);
			}
			TemplateToken::Mustache {
				body, triple: true, ..
			} => {
				let expression = body.trim().to_string();
				push_statement(&mut root, &mut stack, Statement::Mustache { expression });
			}
			TemplateToken::Mustache { body, start, .. } => {
				match TagKind::classify(&body) {
					TagKind::OpenBlock(name) => stack.push(BlockFrame::program(name, start)),
					TagKind::OpenInverse(name) => stack.push(BlockFrame::inverse(name, start)),
					TagKind::Else => {
						let Some(frame) = stack.last_mut() else {
							return Err(unexpected_else(start));
						};
						frame.switch_branch();
					}
					TagKind::ChainedElse(expression) => {
						let Some(frame) = stack.last_mut() else {
							return Err(unexpected_else(start));
						};
						frame.switch_branch();
						let helper = expression
							.split_whitespace()
							.next()
							.unwrap_or_default()
							.to_string();
						stack.push(BlockFrame::chained(helper, start));
					}
					TagKind::Close(name) => close_block(&mut root, &mut stack, &name, start)?,
					TagKind::Partial(name) => {
						push_statement(&mut root, &mut stack, Statement::Partial { name });
					}
					TagKind::Comment(value) => {
						push_statement(&mut root, &mut stack, Statement::Comment { value });
					}
					TagKind::Expression(expression) => {
						push_statement(&mut root, &mut stack, Statement::Mustache { expression });
					}
				}
			}
		}
	}

	// The bottom of the stack is always an explicitly opened block.
	if let Some(frame) = stack.into_iter().next() {
		return Err(SpellError::UnclosedBlock {
			name: frame.name,
			line: frame.start.line,
			column: frame.start.column,
		});
	}

	Ok(Template::new(root))
}

/// An open block waiting for its close tag.
struct BlockFrame {
	name: String,
	start: Point,
	program: Option<Vec<Statement>>,
	inverse: Option<Vec<Statement>>,
	in_inverse: bool,
	/// Opened implicitly by `{{else if ...}}` and closed by its parent's
	/// close tag.
	chained: bool,
}

impl BlockFrame {
	fn program(name: String, start: Point) -> Self {
		Self {
			name,
			start,
			program: Some(vec![]),
			inverse: None,
			in_inverse: false,
			chained: false,
		}
	}

	fn inverse(name: String, start: Point) -> Self {
		Self {
			name,
			start,
			program: None,
			inverse: Some(vec![]),
			in_inverse: true,
			chained: false,
		}
	}

	fn chained(name: String, start: Point) -> Self {
		Self {
			chained: true,
			..Self::program(name, start)
		}
	}

	fn switch_branch(&mut self) {
		self.in_inverse = !self.in_inverse;
		if self.in_inverse {
			self.inverse.get_or_insert_with(Vec::new);
		} else {
			self.program.get_or_insert_with(Vec::new);
		}
	}

	fn push(&mut self, statement: Statement) {
		let branch = if self.in_inverse {
			&mut self.inverse
		} else {
			&mut self.program
		};
		branch.get_or_insert_with(Vec::new).push(statement);
	}

	fn into_statement(self) -> Statement {
		Statement::Block {
			name: self.name,
			program: self.program,
			inverse: self.inverse,
		}
	}
}

fn push_statement(root: &mut Vec<Statement>, stack: &mut [BlockFrame], statement: Statement) {
	match stack.last_mut() {
		Some(frame) => frame.push(statement),
		None => root.push(statement),
	}
}

fn close_block(
	root: &mut Vec<Statement>,
	stack: &mut Vec<BlockFrame>,
	name: &str,
	start: Point,
) -> SpellResult<()> {
	let Some(mut frame) = stack.pop() else {
		// A close tag with nothing open is ignored, keeping parsing lenient.
		tracing::debug!(name, %start, "ignoring close tag without an open block");
		return Ok(());
	};

	// Fold implicit `else if` frames into their parents first.
	while frame.chained {
		let Some(mut parent) = stack.pop() else {
			break;
		};
		parent.push(frame.into_statement());
		frame = parent;
	}

	if frame.name != name {
		return Err(SpellError::MismatchedBlock {
			expected: frame.name,
			found: name.to_string(),
			line: start.line,
			column: start.column,
		});
	}

	push_statement(root, stack, frame.into_statement());
	Ok(())
}

fn unexpected_else(start: Point) -> SpellError {
	SpellError::UnexpectedElse {
		line: start.line,
		column: start.column,
	}
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}
