use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SpellError {
	#[error(transparent)]
	#[diagnostic(code(hbspell::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hbspell::config_parse),
		help("check that hbspell.toml is valid TOML with [dictionary], [templates] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("unterminated tag `{opening}` at {line}:{column}")]
	#[diagnostic(
		code(hbspell::unterminated_tag),
		help("close the tag with the matching `}}}}`")
	)]
	UnterminatedTag {
		opening: String,
		line: usize,
		column: usize,
	},

	#[error("`{found}` doesn't match `{expected}` at {line}:{column}")]
	#[diagnostic(
		code(hbspell::mismatched_block),
		help("close `{{{{#{expected}}}}}` with `{{{{/{expected}}}}}` before closing its parent")
	)]
	MismatchedBlock {
		expected: String,
		found: String,
		line: usize,
		column: usize,
	},

	#[error("missing closing tag for block `{name}` opened at {line}:{column}")]
	#[diagnostic(
		code(hbspell::unclosed_block),
		help("add `{{{{/{name}}}}}` to close this block")
	)]
	UnclosedBlock {
		name: String,
		line: usize,
		column: usize,
	},

	#[error("`else` outside of a block at {line}:{column}")]
	#[diagnostic(code(hbspell::unexpected_else))]
	UnexpectedElse { line: usize, column: usize },

	#[error("spell-check failed for `{word}`: {reason}")]
	#[diagnostic(
		code(hbspell::oracle),
		help("check that the configured dictionary is readable")
	)]
	Oracle { word: String, reason: String },

	#[error("spell-check task did not complete: {0}")]
	#[diagnostic(code(hbspell::oracle_task))]
	OracleTask(String),

	#[error("failed to load dictionary `{path}`: {reason}")]
	#[diagnostic(
		code(hbspell::dictionary),
		help("set `[dictionary] paths` in hbspell.toml or pass `--dictionary <file>`")
	)]
	Dictionary { path: String, reason: String },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(hbspell::file_too_large),
		help("increase `max_file_size` in hbspell.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(hbspell::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type SpellResult<T> = Result<T, SpellError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
