mod common;

use hbspell_core::AnyEmptyResult;
use similar_asserts::assert_eq;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::hbspell_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("hbspell.toml"));

	let config_path = tmp.path().join("hbspell.toml");
	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("[dictionary]"));
	assert!(content.contains("[templates]"));
	assert!(content.contains("[tokenizer]"));

	Ok(())
}

#[test]
fn init_config_is_usable() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "views/page.hbs", "Hello")?;

	common::hbspell_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::hbspell_cmd()
		.arg("words")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("views/page.hbs:1:0 Hello"));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join("hbspell.toml");
	std::fs::write(&config_path, "existing config")?;

	common::hbspell_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");

	Ok(())
}

#[test]
fn init_respects_other_config_locations() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), ".config/hbspell.toml", "")?;

	common::hbspell_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert!(!tmp.path().join("hbspell.toml").exists());

	Ok(())
}
