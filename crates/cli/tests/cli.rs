use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn render_markdown_fixture() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("render").arg(fixture_path("sample.md"));

    let output_pred = predicate::str::starts_with("<style type=\"text/css\">")
        .and(predicate::str::contains("<h1>Release&nbsp;notes</h1>"))
        .and(predicate::str::contains(
            r#"<div class="footnote__ref">[thanks]</div>"#,
        ))
        .and(predicate::str::contains("task-list-item__checkbox--checked"))
        .and(predicate::str::contains("| Feature | Status |"))
        .and(predicate::str::contains("| Tables&nbsp; | &nbsp;&nbsp;done |"))
        .and(predicate::str::contains(r#"<div class="blockquote">"#))
        .and(predicate::str::contains("<table").not())
        .and(predicate::str::contains("<input").not());

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn render_json_fixture_fragment() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("render")
        .arg(fixture_path("nodes.json"))
        .arg("--fragment");

    cmd.assert().success().stdout(predicate::str::diff(
        "<h2>Hi&nbsp;there</h2>\nUNHANDLED: frobnicate\n<p><a href=\"/docs\">docs</a></p>\n",
    ));
}

#[test]
fn render_from_stdin_with_flags() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.args(["render", "-", "--fragment", "--ordered-lists", "--link-attribute", "src"])
        .write_stdin("3. [go](/x)\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff(
            "<ol start=\"3\"><li><a src=\"/x\">go</a></li></ol>\n",
        ));
}

#[test]
fn render_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("preview.html");

    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("render")
        .arg(fixture_path("nodes.json"))
        .arg("--output")
        .arg(&out);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("<style"));
    assert!(written.ends_with("<p><a href=\"/docs\">docs</a></p>"));
}

#[test]
fn render_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    fs::write(&config, r#"{"allow_raw_html": false}"#).unwrap();

    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.args(["render", "-", "--fragment", "--config"])
        .arg(&config)
        .write_stdin("a <b>b</b>\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<b>").not());
}

#[test]
fn malformed_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, r#"[{"kind": "heading", "children": []}]"#).unwrap();

    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("render").arg(&input);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed node"));
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("render").arg("does-not-exist.md");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("reading does-not-exist.md"));
}

#[test]
fn ast_prints_nodes() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.args(["ast", "-"]).write_stdin("## Hi\n");

    cmd.assert().success().stdout(
        predicate::str::contains(r#""kind": "heading""#)
            .and(predicate::str::contains(r#""level": 2"#)),
    );
}

#[test]
fn stylesheet_command() {
    let mut cmd = cargo_bin_cmd!("minimark");
    cmd.arg("stylesheet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".task-list-item__checkbox--checked"));
}
