use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use hbspell_cli::Commands;
use hbspell_cli::HbspellCli;
use hbspell_cli::OutputFormat;
use hbspell_cli::WordListOracle;
use hbspell_cli::WordsOutputFormat;
use hbspell_core::AnyEmptyResult;
use hbspell_core::Correction;
use hbspell_core::MatchSummary;
use hbspell_core::SpellError;
use hbspell_core::SpellResult;
use hbspell_core::TokenizerOptions;
use hbspell_core::all_words_with_options;
use hbspell_core::check_template;
use hbspell_core::config::SpellConfig;
use hbspell_core::project::find_templates;
use hbspell_core::project::read_template;
use owo_colors::OwoColorize;
use tokio::task::JoinSet;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = r#"# hbspell configuration

[dictionary]
# Word lists with one word per line, relative to the project root.
# paths = ["/usr/share/dict/words"]
# Words to accept on top of the word lists, such as product names.
words = []
# How many suggestions to show for each misspelled word.
max_suggestions = 5

[templates]
patterns = ["**/*.hbs", "**/*.handlebars"]

# Gitignore-style patterns for templates that are never checked.
# [exclude]
# patterns = ["vendor/"]

[tokenizer]
# Elements whose bodies are never spell-checked.
skip_tags = ["script", "style"]
"#;

fn main() {
	let args = HbspellCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Check { files, format }) => run_check(&args, files, *format),
		Some(Commands::Words { files, format }) => run_words(&args, files, *format),
		None => {
			eprintln!("No subcommand specified. Run `hbspell --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		print_error(e);
		process::exit(2);
	}
}

/// Logs go to stderr. `HBSPELL_LOG` overrides the level chosen by
/// `--verbose`.
fn init_tracing(verbose: bool) {
	let level = if verbose {
		"warn,hbspell=debug,hbspell_core=debug"
	} else {
		"warn"
	};

	let filter = tracing_subscriber::EnvFilter::try_from_env("HBSPELL_LOG")
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

fn print_error(e: Box<dyn std::error::Error>) {
	// Try to render through miette for rich diagnostics with help text and
	// error codes.
	match e.downcast::<SpellError>() {
		Ok(spell_err) => {
			let report: miette::Report = (*spell_err).into();
			eprintln!("{report:?}");
		}
		Err(e) => {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn resolve_root(args: &HbspellCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &HbspellCli) -> AnyEmptyResult {
	let root = resolve_root(args);

	if let Some(existing) = SpellConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("hbspell.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Point `[dictionary] paths` at one or more word lists");
	println!("  2. Run `hbspell words` to see what will be checked");
	println!("  3. Run `hbspell check` to find misspellings");

	Ok(())
}

/// Explicit files are resolved against the project root. Without any, the
/// config's template patterns are used.
fn resolve_templates(
	root: &Path,
	config: &SpellConfig,
	files: &[PathBuf],
) -> SpellResult<Vec<PathBuf>> {
	if files.is_empty() {
		return find_templates(root, config);
	}

	Ok(files
		.iter()
		.map(|file| {
			if file.is_absolute() {
				file.clone()
			} else {
				root.join(file)
			}
		})
		.collect())
}

fn build_oracle(
	args: &HbspellCli,
	root: &Path,
	config: &SpellConfig,
) -> SpellResult<WordListOracle> {
	let paths = if args.dictionary.is_empty() {
		config.dictionary_paths(root)
	} else {
		args.dictionary.clone()
	};
	let extra: Vec<String> = config
		.dictionary
		.words
		.iter()
		.chain(&args.word)
		.cloned()
		.collect();

	if paths.is_empty() {
		tracing::warn!(
			"no word lists configured; only `[dictionary] words` and `--word` are accepted"
		);
	}

	WordListOracle::from_paths(&paths, &extra, config.dictionary.max_suggestions)
}

/// The outcome of checking a single template.
struct FileReport {
	source: String,
	content: String,
	corrections: Vec<Correction>,
	summary: MatchSummary,
}

fn run_check(args: &HbspellCli, files: &[PathBuf], format: OutputFormat) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config = SpellConfig::load_or_default(&root)?;
	let oracle = Arc::new(build_oracle(args, &root, &config)?);
	let templates = resolve_templates(&root, &config, files)?;
	let options = Arc::new(config.tokenizer_options());

	let runtime = tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()?;
	let results = runtime.block_on(check_templates(
		&root,
		config.max_file_size,
		templates,
		oracle,
		options,
	))?;

	let mut reports = vec![];
	let mut errors = vec![];
	for (source, result) in results {
		match result {
			Ok(report) => reports.push(report),
			Err(error) => errors.push((source, error)),
		}
	}

	let misspelled: usize = reports.iter().map(|report| report.summary.corrections).sum();

	match format {
		OutputFormat::Json => print_check_json(&reports, &errors),
		OutputFormat::Github => print_check_github(&reports, &errors),
		OutputFormat::Text => print_check_text(&reports),
	}

	let has_errors = !errors.is_empty();
	if !matches!(format, OutputFormat::Json) {
		for (source, error) in errors {
			eprintln!("{} {source}", colored!("error in", red));
			let report: miette::Report = error.into();
			eprintln!("{report:?}");
		}
	}

	if has_errors {
		eprintln!();
		eprintln!("{}", check_summary(&reports, misspelled));
		process::exit(2);
	}

	if misspelled > 0 {
		if matches!(format, OutputFormat::Text | OutputFormat::Github) {
			eprintln!("{}", check_summary(&reports, misspelled));
		}
		process::exit(1);
	}

	if matches!(format, OutputFormat::Text) {
		println!("{}", check_summary(&reports, misspelled));
	}

	Ok(())
}

/// Spell-check every template concurrently, keeping the input order.
async fn check_templates(
	root: &Path,
	max_file_size: u64,
	templates: Vec<PathBuf>,
	oracle: Arc<WordListOracle>,
	options: Arc<TokenizerOptions>,
) -> SpellResult<Vec<(String, SpellResult<FileReport>)>> {
	let mut tasks = JoinSet::new();

	for (index, path) in templates.into_iter().enumerate() {
		let source = make_relative(&path, root);
		let oracle = Arc::clone(&oracle);
		let options = Arc::clone(&options);

		tasks.spawn(async move {
			let result = check_file(path, source.clone(), max_file_size, oracle, &options).await;
			(index, source, result)
		});
	}

	let mut results = Vec::with_capacity(tasks.len());
	while let Some(joined) = tasks.join_next().await {
		results.push(joined.map_err(|e| SpellError::OracleTask(e.to_string()))?);
	}
	results.sort_by_key(|(index, ..)| *index);

	Ok(results
		.into_iter()
		.map(|(_, source, result)| (source, result))
		.collect())
}

async fn check_file(
	path: PathBuf,
	source: String,
	max_file_size: u64,
	oracle: Arc<WordListOracle>,
	options: &TokenizerOptions,
) -> SpellResult<FileReport> {
	let content = read_template(&path, max_file_size)?;
	let mut corrections = vec![];
	let summary = check_template(&content, &source, oracle, options, |correction| {
		corrections.push(correction);
	})
	.await?;
	corrections.sort_by_key(|correction| (correction.line, correction.column));

	Ok(FileReport {
		source,
		content,
		corrections,
		summary,
	})
}

fn check_summary(reports: &[FileReport], misspelled: usize) -> String {
	let checked = reports.len();
	if misspelled == 0 {
		return format!("Check passed: no misspelled words in {checked} template(s).");
	}

	let failing = reports
		.iter()
		.filter(|report| !report.summary.is_clean())
		.count();
	format!("Found {misspelled} misspelled word(s) in {failing} of {checked} template(s).")
}

fn print_check_text(reports: &[FileReport]) {
	for report in reports {
		let lines: Vec<&str> = report.content.lines().collect();

		for correction in &report.corrections {
			println!(
				"{} {}",
				colored!(
					format!(
						"{}:{}:{}",
						report.source, correction.line, correction.column
					),
					bold
				),
				colored!(correction.original, red)
			);

			if let Some(line) = lines.get(correction.line.saturating_sub(1)) {
				let number = correction.line.to_string();
				let gutter = " ".repeat(number.len());
				println!("  {number} | {line}");
				println!(
					"  {gutter} | {}{}",
					caret_indent(line, correction.column),
					colored!("^".repeat(correction.original.chars().count()), red)
				);
			}

			if correction.suggestions.is_empty() {
				println!("  {}", colored!("no suggestions", yellow));
			} else {
				println!(
					"  {} {}",
					colored!("suggestions:", green),
					correction.suggestions.join(", ")
				);
			}
			println!();
		}
	}
}

/// Whitespace lining a caret up under `column`, keeping tabs so the
/// underline stays aligned.
fn caret_indent(line: &str, column: usize) -> String {
	line.chars()
		.take(column)
		.map(|ch| if ch == '\t' { '\t' } else { ' ' })
		.collect()
}

fn print_check_json(reports: &[FileReport], errors: &[(String, SpellError)]) {
	let corrections: Vec<serde_json::Value> = reports
		.iter()
		.flat_map(|report| &report.corrections)
		.map(|correction| {
			serde_json::json!({
				"file": correction.source,
				"word": correction.original,
				"line": correction.line,
				"column": correction.column,
				"suggestions": correction.suggestions,
			})
		})
		.collect();
	let error_entries: Vec<serde_json::Value> = errors
		.iter()
		.map(|(source, error)| {
			serde_json::json!({
				"file": source,
				"message": error.to_string(),
			})
		})
		.collect();
	let checked: usize = reports.iter().map(|report| report.summary.checked).sum();

	let output = serde_json::json!({
		"ok": corrections.is_empty() && error_entries.is_empty(),
		"templates": reports.len(),
		"words": checked,
		"corrections": corrections,
		"errors": error_entries,
	});
	println!("{output}");
}

fn print_check_github(reports: &[FileReport], errors: &[(String, SpellError)]) {
	for (source, error) in errors {
		println!("::error file={source}::{error}");
	}

	for report in reports {
		for correction in &report.corrections {
			let hint = if correction.suggestions.is_empty() {
				String::new()
			} else {
				format!(" Did you mean: {}?", correction.suggestions.join(", "))
			};
			// Annotation columns are 1-indexed.
			println!(
				"::warning file={},line={},col={}::Misspelled word `{}`.{hint}",
				report.source,
				correction.line,
				correction.column + 1,
				correction.original
			);
		}
	}
}

fn run_words(args: &HbspellCli, files: &[PathBuf], format: WordsOutputFormat) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config = SpellConfig::load_or_default(&root)?;
	let templates = resolve_templates(&root, &config, files)?;
	let options = config.tokenizer_options();

	let mut words = vec![];
	for path in &templates {
		let source = make_relative(path, &root);
		let content = read_template(path, config.max_file_size)?;
		words.extend(all_words_with_options(&content, &source, &options)?);
	}

	match format {
		WordsOutputFormat::Json => {
			println!("{}", serde_json::to_string(&words)?);
		}
		WordsOutputFormat::Text => {
			for word in &words {
				println!("{word}");
			}
			eprintln!(
				"{} word(s) in {} template(s)",
				words.len(),
				templates.len()
			);
		}
	}

	Ok(())
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
