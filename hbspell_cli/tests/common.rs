#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use hbspell_core::AnyEmptyResult;
use insta_cmd::get_cargo_bin;

pub fn hbspell_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("hbspell"));
	cmd.env("NO_COLOR", "1").env_remove("HBSPELL_LOG");
	cmd
}

/// A project with a small word list and one template per `(name, content)`.
pub fn project(templates: &[(&str, &str)]) -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("words.txt"),
		"hello\nhelp\nworld\nword\nbye\ntemplate\n",
	)?;
	std::fs::write(
		tmp.path().join("hbspell.toml"),
		"[dictionary]\npaths = [\"words.txt\"]\n",
	)?;
	for (name, content) in templates {
		write(tmp.path(), name, content)?;
	}

	Ok(tmp)
}

pub fn write(root: &Path, relative: &str, content: &str) -> AnyEmptyResult {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;

	Ok(())
}
