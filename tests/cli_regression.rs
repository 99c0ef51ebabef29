// CLI regression tests: exit status per verdict, JSON shape, file probing and
// miette-rendered errors.

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn pushdown() -> Command {
    Command::cargo_bin("pushdown").unwrap()
}

#[test]
fn accepted_input_exits_zero() {
    pushdown()
        .args(["check", "filename", "report_final.pdf"])
        .assert()
        .success()
        .stdout(contains("ACCEPTED").and(contains("ACCEPT - valid filename")));
}

#[test]
fn rejected_input_exits_one() {
    pushdown()
        .args(["check", "xml", "<a><b></a>"])
        .assert()
        .code(1)
        .stdout(contains("REJECT - tag mismatch (opened: b, closed: a)"));
}

#[test]
fn unknown_validator_is_a_usage_error() {
    pushdown()
        .args(["check", "json", "{}"])
        .assert()
        .code(2)
        .stderr(contains("json"));
}

#[test]
fn json_output_carries_the_call_contract() {
    let output = pushdown()
        .args(["--json", "check", "multilevel", "<data>report_final.pdf</data>"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["accepted"], true);
    assert_eq!(value["final_state"], "q_accept");
    assert_eq!(value["final_stack"], serde_json::json!(["Z0"]));
    assert_eq!(value["step_count"], value["trace"].as_array().unwrap().len());
    assert_eq!(value["validator"], "multilevel");
}

#[test]
fn file_command_probes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.xml");
    fs::write(&path, "<page><title>Hi</title></page>").unwrap();

    pushdown()
        .arg("file")
        .arg("xml")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("page.xml").and(contains("ACCEPT - valid XML")));
}

#[test]
fn disallowed_extension_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie.mp4");
    fs::write(&path, "not really a movie").unwrap();

    pushdown()
        .arg("file")
        .arg("filename")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(contains("pushdown::input").and(contains("upload list")));
}

#[test]
fn missing_file_renders_a_diagnostic() {
    pushdown()
        .args(["file", "content", "tests/does_not_exist.txt"])
        .assert()
        .code(2)
        .stderr(contains("pushdown::io"));
}

#[test]
fn batch_writes_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("notes.txt");
    let bad = dir.path().join("broken.xml");
    fs::write(&good, "plaintext123").unwrap();
    fs::write(&bad, "@@@ <a>").unwrap();
    let report = dir.path().join("report.json");

    pushdown()
        .arg("batch")
        .arg("content")
        .arg(&good)
        .arg(&bad)
        .arg("--report")
        .arg(&report)
        .assert()
        .code(1)
        .stdout(contains("VALID").and(contains("INVALID")));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["statistics"]["total"], 2);
    assert_eq!(value["statistics"]["valid"], 1);
    assert_eq!(value["statistics"]["valid_percentage"], 50.0);
}

#[test]
fn malformed_config_points_at_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pushdown.yaml");
    fs::write(&config, "preview_chars: many\n").unwrap();

    pushdown()
        .arg("--config")
        .arg(&config)
        .args(["check", "filetype", "pdf"])
        .assert()
        .code(2)
        .stderr(contains("pushdown::config"));
}

#[test]
fn table_lists_transitions_as_json() {
    let output = pushdown().args(["--json", "table", "filename"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert!(!rows.is_empty());
    assert!(rows[0].get("new_state").is_some());
}

#[test]
fn samples_list_every_validator() {
    pushdown()
        .arg("samples")
        .assert()
        .success()
        .stdout(
            contains("filename")
                .and(contains("content"))
                .and(contains("filetype"))
                .and(contains("xml"))
                .and(contains("multilevel")),
        );
}

#[test]
fn suites_pass_through_the_cli() {
    pushdown()
        .args(["test", "tests/suites"])
        .assert()
        .success()
        .stdout(contains("Suite summary"));
}
