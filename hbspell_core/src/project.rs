use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::SpellError;
use crate::SpellResult;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::SpellConfig;
use crate::parser::normalize_line_endings;

/// Find every template under `root` matching the configured patterns.
///
/// When `disable_gitignore` is false (the default), files matched by the
/// project's `.gitignore` are skipped. Exclude patterns from `[exclude]`
/// follow gitignore syntax and are always applied on top. The result is
/// sorted.
pub fn find_templates(root: &Path, config: &SpellConfig) -> SpellResult<Vec<PathBuf>> {
	let include_set = build_glob_set(&config.templates.patterns)?;
	let gitignore = if config.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let custom_exclude = build_exclude_matcher(root, &config.exclude.patterns)?;

	let mut walker = TemplateWalker {
		root,
		include_set: &include_set,
		gitignore: &gitignore,
		custom_exclude: &custom_exclude,
		ancestors: HashSet::new(),
		files: vec![],
	};
	walker.walk_dir(root)?;

	let mut files = walker.files;
	files.sort();
	tracing::debug!(root = %root.display(), templates = files.len(), "found templates");
	Ok(files)
}

/// Read a template, refusing files over `max_file_size` bytes.
pub fn read_template(path: &Path, max_file_size: u64) -> SpellResult<String> {
	let size = std::fs::metadata(path)?.len();
	if size > max_file_size {
		tracing::warn!(path = %path.display(), size, "template exceeds the size limit");
		return Err(SpellError::FileTooLarge {
			path: path.display().to_string(),
			size,
			limit: max_file_size,
		});
	}

	let content = std::fs::read_to_string(path)?;
	Ok(normalize_line_endings(&content))
}

/// Build a `GlobSet` from the configured template patterns.
fn build_glob_set(patterns: &[String]) -> SpellResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| {
			SpellError::ConfigParse(format!("invalid template pattern `{pattern}`: {e}"))
		})?;
		builder.add(glob);
	}
	builder
		.build()
		.map_err(|e| SpellError::ConfigParse(format!("failed to build template patterns: {e}")))
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> SpellResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			SpellError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| SpellError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn has_project_config(dir: &Path) -> bool {
	CONFIG_FILE_CANDIDATES
		.iter()
		.any(|candidate| dir.join(candidate).is_file())
}

struct TemplateWalker<'a> {
	root: &'a Path,
	include_set: &'a GlobSet,
	gitignore: &'a Gitignore,
	custom_exclude: &'a Gitignore,
	/// Canonical paths of the directories on the current recursion path.
	ancestors: HashSet<PathBuf>,
	files: Vec<PathBuf>,
}

impl TemplateWalker<'_> {
	fn walk_dir(&mut self, dir: &Path) -> SpellResult<()> {
		if !dir.is_dir() {
			return Ok(());
		}

		// A directory that is its own ancestor is a symlink cycle. Aliases of
		// directories elsewhere in the tree are walked again.
		let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
		if !self.ancestors.insert(canonical.clone()) {
			return Err(SpellError::SymlinkCycle {
				path: dir.display().to_string(),
			});
		}

		for entry in std::fs::read_dir(dir)? {
			let path = entry?.path();

			if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
				if is_ignored_directory_name(name) {
					continue;
				}
			}

			let is_dir = path.is_dir();

			if self.gitignore.matched(&path, is_dir).is_ignore()
				|| self.custom_exclude.matched(&path, is_dir).is_ignore()
			{
				continue;
			}

			if is_dir {
				// Nested projects with their own config are checked separately.
				if has_project_config(&path) {
					continue;
				}
				self.walk_dir(&path)?;
			} else if path
				.strip_prefix(self.root)
				.is_ok_and(|rel_path| self.include_set.is_match(rel_path))
			{
				self.files.push(path);
			}
		}

		self.ancestors.remove(&canonical);
		Ok(())
	}
}
