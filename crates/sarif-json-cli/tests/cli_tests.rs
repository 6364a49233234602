//! Integration tests for the `sarif-json` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the convert, format
//! and check subcommands through the actual binary, including stdin/stdout
//! piping, file I/O and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture must exist")
}

fn cli() -> Command {
    Command::cargo_bin("sarif-json").unwrap()
}

/// Unique scratch path under the system temp directory.
fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sarif-json-{}-{}", std::process::id(), name))
}

// ─────────────────────────────────────────────────────────────────────────────
// Convert subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_file_to_stdout() {
    cli()
        .args(["convert", "-i", fixture("defects.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n\"version\":\"1.0.0-beta.5\",\n"))
        .stdout(predicate::str::contains("\"ruleId\":\"6001\""))
        .stdout(predicate::str::contains("\"ruleId\":\"6011\""))
        .stdout(predicate::str::contains(
            "\"uri\":\"file:\\/\\/\\/c:\\/src\\/main.cpp\"",
        ));
}

#[test]
fn convert_stdin_to_stdout() {
    cli()
        .arg("convert")
        .write_stdin(read_fixture("defects.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"PREfast\""));
}

#[test]
fn convert_output_is_valid_sarif_json() {
    let output = cli()
        .args(["convert", "-i", fixture("defects.json").as_str()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sarif: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sarif["$schema"], "http://json.schemastore.org/sarif-1.0.0-beta.5");

    let run = &sarif["runs"][0];
    assert_eq!(run["tool"]["fullName"], "PREfast Code Analysis");
    assert_eq!(run["results"].as_array().unwrap().len(), 2);
    assert_eq!(run["logicalLocations"]["?Load@Util@@QEAAXXZ"]["name"], "Util::Load");

    let first = &run["results"][0];
    assert_eq!(first["properties"]["ruleCategory"], "mspft");
    let steps = first["codeFlows"][0]["locations"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["message"], "'x' is not initialized");

    // (0, 0) means no region
    let second_file = &run["results"][1]["locations"][0]["resultFile"];
    assert!(second_file.get("region").is_none());
}

#[test]
fn convert_file_to_file() {
    let out = temp_path("convert.sarif");
    let _ = std::fs::remove_file(&out);

    cli()
        .args(["convert", "-i", fixture("defects.json").as_str(), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).expect("output file must exist");
    assert!(content.contains("\"runs\":["));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn convert_rejects_non_defect_input() {
    cli()
        .arg("convert")
        .write_stdin("{\"not\":\"a list\"}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read defect list"));
}

#[test]
fn convert_reports_invalid_region() {
    let input = r#"[{"sfa":{"fileName":"a.c","line":"0","column":"3"},"defectCode":"1"}]"#;
    cli()
        .arg("convert")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build SARIF log"))
        .stderr(predicate::str::contains("Invalid region specified"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Format subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_pretty_prints_in_key_order() {
    cli()
        .args(["format", "-i", fixture("sample.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "{\n\"name\":\"PREfast\",\n\"version\":\"14.0.0\",\n\"rules\":[\n  \"6001\",\"6011\",\"28182\"\n],",
        ))
        .stdout(predicate::str::contains("\"threshold\":2.500000"))
        .stdout(predicate::str::contains("\"exclude\":[\n    \"c:\\/src\\/third_party\"\n  ]"));
}

#[test]
fn format_stdin_compact_array() {
    cli()
        .arg("format")
        .write_stdin("[1, 2, 3]")
        .assert()
        .success()
        .stdout("[\n1,2,3\n]");
}

#[test]
fn format_is_idempotent() {
    let first = cli()
        .args(["format", "-i", fixture("sample.json").as_str()])
        .output()
        .unwrap();
    assert!(first.status.success());

    cli()
        .arg("format")
        .write_stdin(first.stdout.clone())
        .assert()
        .success()
        .stdout(first.stdout);
}

#[test]
fn format_strict_reports_parse_error() {
    cli()
        .args(["format", "-i", fixture("broken.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON document"))
        .stderr(predicate::str::contains("JSON parse error at byte"));
}

#[test]
fn format_lenient_prints_null() {
    cli()
        .args(["format", "--lenient", "-i", fixture("broken.json").as_str()])
        .assert()
        .success()
        .stdout("null");
}

#[test]
fn format_lenient_logs_swallowed_error_at_debug() {
    cli()
        .args(["--log-level", "debug", "format", "--lenient", "-i", fixture("broken.json").as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed JSON document"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_reports_kind_and_size() {
    cli()
        .args(["check", "-i", fixture("sample.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind:   ObjectVal"))
        .stdout(predicate::str::contains("size:   7"))
        .stdout(predicate::str::contains("strict: yes"));
}

#[test]
fn check_flags_trimmed_strings_as_differing() {
    cli()
        .arg("check")
        .write_stdin(r#"[" padded "]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind:   ArrayVal"))
        .stdout(predicate::str::contains("strict: differs"));
}

#[test]
fn check_flags_lenient_syntax() {
    cli()
        .arg("check")
        .write_stdin("[TRUE, 1,]")
        .assert()
        .success()
        .stdout(predicate::str::contains("size:   2"))
        .stdout(predicate::str::contains("strict: no"));
}

#[test]
fn check_fails_on_malformed_input() {
    cli()
        .args(["check", "-i", fixture("broken.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON document"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_file_fails() {
    cli()
        .args(["format", "-i", "/nonexistent/path/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn missing_subcommand_fails() {
    cli().assert().failure();
}

#[test]
fn help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("format"))
        .stdout(predicate::str::contains("check"));
}
