use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const GREET_SPEC: &str = r#"
command:
  name: greet
  version: "1.0.0"
  params: [who]
  params_required: 1
  summary: Print a greeting
options:
  - name: times
    alias: t
    type: number
    default: 1
    help: Number of repetitions
  - name: shout
    alias: s
    is_flag: true
    help: Print in upper case
"#;

fn optspec_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_optspec"))
}

fn write_spec(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write spec");
    path
}

fn run(args: &[&str], spec: &Path, trailing: &[&str]) -> Output {
    Command::new(optspec_bin())
        .args(args)
        .arg(spec)
        .arg("--")
        .args(trailing)
        .output()
        .expect("failed to run optspec")
}

// ---- check / render tests ----

#[test]
fn test_check_accepts_valid_spec() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = Command::new(optspec_bin())
        .arg("check")
        .arg(&spec)
        .output()
        .expect("failed to run optspec");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "ok: greet (4 options)");
}

#[test]
fn test_check_reports_spec_error() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "bad.json",
        r#"{"command": {"name": "tool"}, "options": [{"name": "help2", "alias": "h", "is_flag": true}]}"#,
    );

    let output = Command::new(optspec_bin())
        .arg("check")
        .arg(&spec)
        .output()
        .expect("failed to run optspec");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid spec: duplicate alias 'h'"), "{stderr}");
}

#[test]
fn test_render_usage() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yml", GREET_SPEC);

    let output = Command::new(optspec_bin())
        .arg("render-usage")
        .arg(&spec)
        .output()
        .expect("failed to run optspec");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Usage:\n  greet [--times <number>] [--shout] who\n  greet --help\n  greet --version\n"
    );
}

// ---- parse tests ----

#[test]
fn test_parse_prints_json_result() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = run(&["parse"], &spec, &["-s", "world"]);
    assert!(
        output.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    assert_eq!(parsed["options"]["shout"], true);
    assert_eq!(parsed["options"]["times"], 1.0);
    assert_eq!(parsed["params"], serde_json::json!(["world"]));
}

#[test]
fn test_parse_yaml_output() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = run(&["parse", "--format", "yaml"], &spec, &["--times", "3", "you"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("times: 3.0"), "{stdout}");
    assert!(stdout.contains("- you"), "{stdout}");
}

#[test]
fn test_parse_help_exits_zero_with_help_text() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = run(&["parse"], &spec, &["--help"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Print a greeting\n\nVersion: 1.0.0\n\nUsage:\n"));
    assert!(stdout.contains("  -t, --times <number>    : Number of repetitions (default: 1)\n"));
}

#[test]
fn test_parse_version_exits_zero() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = run(&["parse"], &spec, &["-v"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1.0.0\n");
}

#[test]
fn test_parse_usage_error_exits_one_with_usage() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "greet.yaml", GREET_SPEC);

    let output = run(&["parse"], &spec, &["--times", "many", "you"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "option \"--times\" value \"many\" is not number\n\nUsage:\n  greet [--times <number>] [--shout] who\n  greet --help\n  greet --version\n"
    );
}

#[test]
fn test_parse_missing_spec_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let output = run(&["parse"], &missing, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
}
