use crate::Point;
use crate::Statement;

/// One unit of extracted template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
	/// Resets the cursor to the start of a content run.
	Marker(Point),
	/// A single character of literal template text.
	Char(char),
}

/// Recover the literal text of a template, discarding template logic.
///
/// Every content run is preceded by a [`Fragment::Marker`] holding the
/// position of its first character, so text split across a block boundary
/// can always be located in the original source. Blocks contribute the text
/// of their primary branch followed by their `else` branch, in document
/// order. Statements that are neither content nor blocks contribute nothing.
pub fn extract_text(statements: &[Statement]) -> Vec<Fragment> {
	let mut fragments = vec![];
	let mut pending: Vec<&Statement> = statements.iter().rev().collect();

	while let Some(statement) = pending.pop() {
		match statement {
			Statement::Content { text, line, column } => {
				fragments.push(Fragment::Marker(Point::new(*line, *column)));
				fragments.extend(text.chars().map(Fragment::Char));
			}
			Statement::Block {
				program, inverse, ..
			} => {
				// Pushed last, popped first.
				for branch in [inverse, program].into_iter().flatten() {
					pending.extend(branch.iter().rev());
				}
			}
			_ => {}
		}
	}

	tracing::debug!(fragments = fragments.len(), "extracted template text");
	fragments
}

/// Render fragments back into plain text, dropping the markers.
pub fn fragments_to_string(fragments: &[Fragment]) -> String {
	fragments
		.iter()
		.filter_map(|fragment| {
			match fragment {
				Fragment::Char(ch) => Some(*ch),
				Fragment::Marker(_) => None,
			}
		})
		.collect()
}
