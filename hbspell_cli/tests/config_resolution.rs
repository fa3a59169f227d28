mod common;

use hbspell_core::AnyEmptyResult;

fn project_without_config() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
	let tmp = common::project(&[("page.hbs", "Helo world")])?;
	std::fs::remove_file(tmp.path().join("hbspell.toml"))?;
	Ok(tmp)
}

#[test]
fn check_resolves_dot_hbspell_toml() -> AnyEmptyResult {
	let tmp = project_without_config()?;
	std::fs::write(
		tmp.path().join(".hbspell.toml"),
		"[dictionary]\npaths = [\"words.txt\"]\nwords = [\"Helo\"]\n",
	)?;

	common::hbspell_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_resolves_dot_config_hbspell_toml() -> AnyEmptyResult {
	let tmp = project_without_config()?;
	common::write(
		tmp.path(),
		".config/hbspell.toml",
		"[dictionary]\npaths = [\"words.txt\"]\nwords = [\"Helo\"]\n",
	)?;

	common::hbspell_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_prefers_hbspell_toml_over_other_candidates() -> AnyEmptyResult {
	let tmp = project_without_config()?;
	std::fs::write(
		tmp.path().join("hbspell.toml"),
		"[dictionary]\npaths = [\"words.txt\"]\n",
	)?;
	std::fs::write(
		tmp.path().join(".hbspell.toml"),
		"[dictionary]\npaths = [\"words.txt\"]\nwords = [\"Helo\"]\n",
	)?;

	common::hbspell_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("page.hbs:1:0 Helo"));

	Ok(())
}

#[test]
fn check_invalid_config_errors() -> AnyEmptyResult {
	let tmp = project_without_config()?;
	std::fs::write(tmp.path().join("hbspell.toml"), "[dictionary\n")?;

	common::hbspell_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
