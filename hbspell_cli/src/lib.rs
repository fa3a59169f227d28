use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

pub use dictionary::*;

mod dictionary;

#[cfg(test)]
mod __tests;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Spell-check the prose inside Handlebars templates.",
	long_about = "hbspell finds the human-readable text in Handlebars templates and checks its \
	              spelling.\n\nTemplate expressions, HTML tags, attribute values, entity \
	              references and the bodies of <script> and <style> elements are never treated \
	              as words, and every misspelling is reported at its exact line and column.\n\nQuick \
	              start:\n  hbspell init   Create an hbspell.toml\n  hbspell check  Spell-check \
	              every template\n  hbspell words  List the words that would be checked"
)]
pub struct HbspellCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Word list to check against, one word per line. Can be repeated.
	/// Replaces the `[dictionary] paths` from the config file.
	#[arg(long, short, global = true)]
	pub dictionary: Vec<PathBuf>,

	/// Extra word to accept. Can be repeated.
	#[arg(long, short, global = true)]
	pub word: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize hbspell in a project by creating a sample `hbspell.toml`.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Spell-check templates.
	///
	/// Checks the given files, or every template the config's `[templates]`
	/// patterns match when none are given. Exits with status 1 when any
	/// word is misspelled and 2 when a template can't be read or parsed.
	Check {
		/// Templates to check, relative to the project root.
		files: Vec<PathBuf>,

		/// Output format for check results. Use `text` for human-readable
		/// output, `json` for programmatic consumption, or `github` for
		/// GitHub Actions annotations that appear inline on PRs.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List every word that would be spell-checked, with its location.
	///
	/// Useful for seeing exactly what hbspell reads as prose.
	Words {
		/// Templates to read, relative to the project root.
		files: Vec<PathBuf>,

		/// Output format. Use `text` for one word per line or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = WordsOutputFormat::Text)]
		format: WordsOutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Each entry includes the
	/// file path, word, position and suggestions.
	Json,
	/// GitHub Actions annotation format. Emits `::warning` annotations that
	/// appear inline on pull request diffs.
	Github,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WordsOutputFormat {
	/// One `file:line:column word` entry per line.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
