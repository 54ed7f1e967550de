use assert_cmd::Command;
use resin_core::AnyEmptyResult;

#[test]
fn inline_rewrites_component_sources() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("app.html"), "<div>\n  Hi\n</div>")?;
	std::fs::write(tmp.path().join("app.css"), ".app { color: red; }")?;
	std::fs::write(
		tmp.path().join("app.ts"),
		"selector: 'app',\ntemplateUrl: 'app.html',\nstyleUrls: ['app.css'],",
	)?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Inlined 1 file(s)"));

	let content = std::fs::read_to_string(tmp.path().join("app.ts"))?;
	assert!(content.contains("template: \"<div> Hi </div>\""));
	assert!(content.contains("styles: ['.app { color: red; }']"));
	assert!(!content.contains("templateUrl"));
	assert!(!content.contains("styleUrls"));

	Ok(())
}

#[test]
fn dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("app.html"), "<p>hi</p>")?;
	let original = "templateUrl: 'app.html'";
	std::fs::write(tmp.path().join("app.ts"), original)?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1")
		.arg("--dry-run")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("would inline 1 file(s)"));

	// File should not have changed
	let content = std::fs::read_to_string(tmp.path().join("app.ts"))?;
	assert_eq!(content, original);

	Ok(())
}

#[test]
fn one_failing_file_does_not_abort_the_batch() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(tmp.path().join("ok.html"), "<p>ok</p>")?;
	std::fs::write(tmp.path().join("ok.ts"), "templateUrl: 'ok.html'")?;
	std::fs::write(tmp.path().join("bad.ts"), "templateUrl: 'missing.html'")?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Inlined 1 file(s)"))
		.stderr(predicates::str::contains("bad.ts"));

	// The sibling file was still transformed.
	let content = std::fs::read_to_string(tmp.path().join("ok.ts"))?;
	assert_eq!(content, "template: \"<p>ok</p>\"");

	Ok(())
}

#[test]
fn scss_stylesheets_compile_before_inlining() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::write(
		tmp.path().join("app.scss"),
		"$primary: #336699;\n.button { color: $primary; }",
	)?;
	std::fs::write(tmp.path().join("app.ts"), "styleUrls: ['app.scss']")?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1").arg(tmp.path()).assert().success();

	let content = std::fs::read_to_string(tmp.path().join("app.ts"))?;
	assert!(content.contains("color: #336699;"));
	assert!(!content.contains("$primary"));

	Ok(())
}

#[test]
fn empty_project_reports_no_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No candidate source files"));

	Ok(())
}

#[test]
fn config_include_patterns_override_the_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	std::fs::create_dir_all(tmp.path().join("src"))?;
	std::fs::write(tmp.path().join("app.html"), "<p>hi</p>")?;
	std::fs::write(tmp.path().join("src/app.html"), "<p>hi</p>")?;
	std::fs::write(tmp.path().join("skip.ts"), "templateUrl: 'app.html'")?;
	std::fs::write(tmp.path().join("src/app.ts"), "templateUrl: 'app.html'")?;
	std::fs::write(
		tmp.path().join("resin.toml"),
		"[include]\npatterns = [\"src/**/*.ts\"]\n",
	)?;

	let mut cmd = Command::cargo_bin("resin")?;
	cmd.env("NO_COLOR", "1")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Inlined 1 file(s)"));

	assert!(std::fs::read_to_string(tmp.path().join("skip.ts"))?.contains("templateUrl"));
	assert!(std::fs::read_to_string(tmp.path().join("src/app.ts"))?.contains("template: "));

	Ok(())
}
