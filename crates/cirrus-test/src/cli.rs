//! CLI regression tests for the `cirrus` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes, and output formats.
//!
//! Run with: `cargo test -p cirrus-test`
//! Requires the `cirrus` binary to be built first (`cargo build -p cirrus`).

use assert_cmd::Command;
use predicates::str::contains;

use crate::service::{fixture, TestService};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `cirrus` binary.
fn cirrus() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cirrus")
        .expect("cirrus binary not found — run `cargo build -p cirrus` first");
    // Keep stderr assertions independent of the caller's environment
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout should be valid UTF-8")
}

// ---------------------------------------------------------------------------
// cirrus compile
// ---------------------------------------------------------------------------

#[test]
fn compile_minimal_prints_yaml_template() {
    let stdout = stdout_of(
        cirrus()
            .args(["compile", "--config"])
            .arg(fixture("minimal.yml")),
    );

    let doc: serde_yaml::Value =
        serde_yaml::from_str(&stdout).expect("compile output should be valid YAML");
    let resources = doc["resources"].as_sequence().expect("resources list");
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["type"], "cloudfunctions.v1beta2.function");
    assert_eq!(resources[0]["name"], "fn1");
    assert_eq!(
        resources[0]["properties"]["sourceArchiveUrl"],
        "gs://bucket1/sls/out.zip"
    );
    assert_eq!(resources[0]["properties"]["httpsTrigger"]["url"], "/hello");
}

#[test]
fn compile_json_format_outputs_valid_json() {
    let stdout = stdout_of(
        cirrus()
            .args(["compile", "--format", "json", "--config"])
            .arg(fixture("full.yml")),
    );

    let v: serde_json::Value =
        serde_json::from_str(&stdout).expect("--format json output should be valid JSON");
    let resources = v["resources"].as_array().expect("resources array");
    assert_eq!(resources.len(), 3);
    assert_eq!(resources[0]["name"], "checkout");
    assert_eq!(resources[1]["name"], "onOrderWritten");
    assert_eq!(resources[2]["name"], "onInvoice");
    assert!(resources[2]["properties"]["eventTrigger"]
        .get("path")
        .is_none());
}

#[test]
fn compile_progress_goes_to_stderr() {
    cirrus()
        .args(["compile", "--config"])
        .arg(fixture("minimal.yml"))
        .assert()
        .success()
        .stderr(contains("Compiling function \"fn1\"..."));
}

#[test]
fn compile_writes_output_file() {
    let service = TestService::from_yaml(
        &std::fs::read_to_string(fixture("minimal.yml")).expect("read fixture"),
    )
    .expect("write service");
    let output = service.output_path("configuration-template.yml");

    let stdout = stdout_of(
        cirrus()
            .args(["compile", "--config"])
            .arg(service.path())
            .arg("--output")
            .arg(&output),
    );
    assert!(stdout.is_empty(), "template should not be printed with --output");

    let written = std::fs::read_to_string(&output).expect("output file should exist");
    let doc: serde_yaml::Value = serde_yaml::from_str(&written).expect("valid YAML");
    assert_eq!(doc["resources"][0]["name"], "fn1");
}

#[test]
fn compile_nonexistent_config_exits_one() {
    cirrus()
        .args(["compile", "--config", "this-file-does-not-exist.yml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("config file not found"));
}

#[test]
fn compile_parse_error_exits_one() {
    cirrus()
        .args(["compile", "--config"])
        .arg(fixture("invalid-parse-error.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("parse error"));
}

#[test]
fn compile_missing_handler_exits_one() {
    cirrus()
        .args(["compile", "--config"])
        .arg(fixture("invalid-missing-handler.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains(
            "Missing \"handler\" property for function \"noHandler\"",
        ));
}

#[test]
fn compile_too_many_events_exits_one() {
    cirrus()
        .args(["compile", "--config"])
        .arg(fixture("invalid-too-many-events.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("has more than one event"));
}

#[test]
fn compile_unsupported_event_exits_one() {
    cirrus()
        .args(["compile", "--config"])
        .arg(fixture("invalid-unsupported-event.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Event type \"ftp\" of function \"ftpFn\" not supported"));
}

#[test]
fn compile_unknown_format_exits_two() {
    cirrus()
        .args(["compile", "--format", "xml", "--config"])
        .arg(fixture("minimal.yml"))
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_log_format_exits_one() {
    cirrus()
        .args(["--log-format", "xml", "compile", "--config"])
        .arg(fixture("minimal.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid log format"));
}

/// Parse the JSON log lines of a run; the final `error:` line is plain text.
fn json_events(stderr: Vec<u8>) -> Vec<serde_json::Value> {
    let stderr = String::from_utf8(stderr).expect("stderr should be valid UTF-8");
    stderr
        .lines()
        .filter(|line| !line.starts_with("error: "))
        .map(|line| serde_json::from_str(line).expect("each log line should be JSON"))
        .collect()
}

#[test]
fn json_logs_are_structured() {
    let output = cirrus()
        .args(["--log-format", "json", "compile", "--config"])
        .arg(fixture("full.yml"))
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();

    let events = json_events(output);
    assert!(events
        .iter()
        .any(|e| e["event"] == "compile_started" && e["service"] == "shop"));
    assert!(events
        .iter()
        .any(|e| e["message"] == "Compiling function \"checkout\"..."));

    let compiled: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "function_compiled")
        .filter_map(|e| e["function"].as_str())
        .collect();
    assert_eq!(compiled, vec!["checkout", "onOrderWritten", "onInvoice"]);

    assert!(events
        .iter()
        .any(|e| e["event"] == "compile_finished" && e["resources"] == 3));
    assert!(!events.iter().any(|e| e["event"] == "compile_failed"));
}

#[test]
fn json_logs_report_compile_failure() {
    let output = cirrus()
        .args(["--log-format", "json", "compile", "--config"])
        .arg(fixture("invalid-missing-handler.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("error: Missing \"handler\""))
        .get_output()
        .stderr
        .clone();

    let events = json_events(output);
    let failed = events
        .iter()
        .find(|e| e["event"] == "compile_failed")
        .expect("compile_failed event should be logged");
    assert_eq!(failed["level"], "ERROR");
    assert!(failed["error"]
        .as_str()
        .is_some_and(|error| error.contains("function \"noHandler\"")));
    assert!(!events.iter().any(|e| e["event"] == "compile_finished"));
    assert!(!events.iter().any(|e| e["event"] == "function_compiled"));
}

// ---------------------------------------------------------------------------
// cirrus validate
// ---------------------------------------------------------------------------

#[test]
fn validate_valid_config_exits_zero() {
    cirrus()
        .args(["validate", "--config"])
        .arg(fixture("full.yml"))
        .assert()
        .success()
        .stdout(contains("ok (3 function(s))"));
}

#[test]
fn validate_invalid_config_exits_one() {
    cirrus()
        .args(["validate", "--config"])
        .arg(fixture("invalid-unsupported-event.yml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("supported event types are: http, event"));
}

#[test]
fn validate_defaults_to_serverless_yml_in_working_dir() {
    let service = TestService::from_yaml("service: empty\n").expect("write service");

    cirrus()
        .current_dir(service.output_path(""))
        .arg("validate")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("package.artifact"));
}
