use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_SKIP_TAGS;
use crate::SpellError;
use crate::SpellResult;
use crate::TokenizerOptions;

/// Default maximum template size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default number of suggestions reported per misspelled word.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["hbspell.toml", ".hbspell.toml", ".config/hbspell.toml"];

/// Template globs used when `[templates]` is absent.
pub const DEFAULT_TEMPLATE_PATTERNS: [&str; 2] = ["**/*.hbs", "**/*.handlebars"];

/// Configuration loaded from an `hbspell.toml` file.
///
/// ```toml
/// [dictionary]
/// paths = ["/usr/share/dict/words", "dictionary/project.txt"]
/// words = ["Handlebars", "hbspell"]
/// max_suggestions = 5
///
/// [templates]
/// patterns = ["app/templates/**/*.hbs"]
///
/// [exclude]
/// patterns = ["vendor/", "*.generated.hbs"]
///
/// [tokenizer]
/// skip_tags = ["script", "style", "code"]
///
/// disable_gitignore = false
/// ```
#[derive(Debug, Deserialize)]
pub struct SpellConfig {
	/// Word lists and extra accepted words.
	#[serde(default)]
	pub dictionary: DictionaryConfig,
	/// Which files are templates.
	#[serde(default)]
	pub templates: TemplatesConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// How markup is read.
	#[serde(default)]
	pub tokenizer: TokenizerConfig,
	/// Maximum template size in bytes. Larger files are reported as errors.
	/// Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// When true, `.gitignore` files are not used for filtering.
	#[serde(default)]
	pub disable_gitignore: bool,
}

impl Default for SpellConfig {
	fn default() -> Self {
		Self {
			dictionary: DictionaryConfig::default(),
			templates: TemplatesConfig::default(),
			exclude: ExcludeConfig::default(),
			tokenizer: TokenizerConfig::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			disable_gitignore: false,
		}
	}
}

/// Dictionary configuration.
#[derive(Debug, Deserialize)]
pub struct DictionaryConfig {
	/// Newline-separated word lists, relative to the project root.
	#[serde(default)]
	pub paths: Vec<PathBuf>,
	/// Additional words to accept, such as product names.
	#[serde(default)]
	pub words: Vec<String>,
	/// How many suggestions to report for each misspelled word.
	#[serde(default = "default_max_suggestions")]
	pub max_suggestions: usize,
}

impl Default for DictionaryConfig {
	fn default() -> Self {
		Self {
			paths: vec![],
			words: vec![],
			max_suggestions: DEFAULT_MAX_SUGGESTIONS,
		}
	}
}

/// Which files are spell-checked when none are given explicitly.
#[derive(Debug, Deserialize)]
pub struct TemplatesConfig {
	/// Glob patterns relative to the project root.
	#[serde(default = "default_template_patterns")]
	pub patterns: Vec<String>,
}

impl Default for TemplatesConfig {
	fn default() -> Self {
		Self {
			patterns: default_template_patterns(),
		}
	}
}

/// Configuration for excluding files and directories from scanning.
///
/// Patterns follow gitignore syntax and are applied on top of any `.gitignore`
/// rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Examples: `"build/"`, `"*.generated.hbs"`, `"!important.hbs"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Markup reading configuration.
#[derive(Debug, Deserialize)]
pub struct TokenizerConfig {
	/// Elements whose bodies are never spell-checked. Case-sensitive.
	#[serde(default = "default_skip_tags")]
	pub skip_tags: Vec<String>,
}

impl Default for TokenizerConfig {
	fn default() -> Self {
		Self {
			skip_tags: default_skip_tags(),
		}
	}
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_max_suggestions() -> usize {
	DEFAULT_MAX_SUGGESTIONS
}

fn default_template_patterns() -> Vec<String> {
	DEFAULT_TEMPLATE_PATTERNS
		.iter()
		.map(ToString::to_string)
		.collect()
}

fn default_skip_tags() -> Vec<String> {
	DEFAULT_SKIP_TAGS.iter().map(ToString::to_string).collect()
}

impl SpellConfig {
	/// Resolve the first supported config file path for `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> SpellResult<Option<SpellConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to the defaults.
	pub fn load_or_default(root: &Path) -> SpellResult<SpellConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn from_toml(content: &str) -> SpellResult<SpellConfig> {
		toml::from_str(content).map_err(|e| SpellError::ConfigParse(e.to_string()))
	}

	pub fn tokenizer_options(&self) -> TokenizerOptions {
		TokenizerOptions {
			skip_tags: self.tokenizer.skip_tags.clone(),
		}
	}

	/// Dictionary paths resolved against `root`.
	pub fn dictionary_paths(&self, root: &Path) -> Vec<PathBuf> {
		self.dictionary
			.paths
			.iter()
			.map(|path| root.join(path))
			.collect()
	}
}
