//! CLI Integration Tests
//!
//! Tests for `triebench` CLI commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the CLI binary command
#[allow(deprecated)]
fn triebench_cmd() -> Command {
    let mut cmd = Command::cargo_bin("triebench").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("TRIEBENCH_CONFIG")
        .env("NO_COLOR", "1");
    cmd
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    triebench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("triebench CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    triebench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("triebench"));
}

#[test]
fn test_invalid_command_shows_error() {
    triebench_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Generate Command Tests
// =============================================================================

#[test]
fn test_generate_reports_word_count() {
    triebench_cmd()
        .args(["generate", "--word-length", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("676"))
        .stdout(predicate::str::contains("Creation time"));
}

#[test]
fn test_generate_parallel_reports_word_count() {
    triebench_cmd()
        .args(["generate", "-n", "3", "--parallel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("17576"));
}

#[test]
fn test_generate_large_length_requires_force() {
    triebench_cmd()
        .args(["generate", "--word-length", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_generate_beyond_maximum_fails() {
    triebench_cmd()
        .args(["generate", "--word-length", "9", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRIE-001"));
}

// =============================================================================
// Search Command Tests
// =============================================================================

#[test]
fn test_search_exact_word() {
    triebench_cmd()
        .args(["search", "-n", "2", "--algorithm", "own-parallel", "ZZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ZZ"))
        .stdout(predicate::str::contains("1 result(s)"));
}

#[test]
fn test_search_json_output() {
    let output = triebench_cmd()
        .args(["search", "-n", "2", "-a", "radix", "-f", "json", "Q"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["algorithm"], "radix");
    assert_eq!(body["count"], 26);
    assert_eq!(body["results"][0], "QA");
}

#[test]
fn test_search_miss_is_not_an_error() {
    triebench_cmd()
        .args(["search", "-n", "2", "ZZZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 result(s)"));
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    triebench_cmd()
        .args(["search", "-n", "2", "--algorithm", "suffix-array", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRIE-002"));
}

// =============================================================================
// Run & Auto Command Tests
// =============================================================================

#[test]
fn test_run_json_statistics() {
    let output = triebench_cmd()
        .args([
            "run", "-n", "2", "-a", "balanced", "-r", "3", "-q", "AB", "-f", "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["algorithm"], "balanced");
    assert_eq!(reports[0]["count"], 3);
    assert_eq!(reports[0]["last_result_count"], 1);
    assert_eq!(reports[0]["corpus_size"], 676);
}

#[test]
fn test_run_table_output() {
    triebench_cmd()
        .args(["run", "-n", "2", "-r", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Avg build"))
        .stdout(predicate::str::contains("own-sequential"));
}

#[test]
fn test_auto_covers_every_enabled_algorithm() {
    let output = triebench_cmd()
        .args(["auto", "-n", "2", "-r", "2", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.as_array().map(Vec::len), Some(6));
    // Each algorithm reports only its own runs
    for report in reports.as_array().unwrap() {
        assert_eq!(report["count"], 2, "{}", report["algorithm"]);
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_file_restricts_algorithms() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("triebench.toml");
    fs::write(
        &config_path,
        r#"
[algorithms]
enabled = ["own-sequential", "radix"]
default = "radix"

[benchmark]
word_length = 1
runs = 2
"#,
    )
    .unwrap();

    let output = triebench_cmd()
        .args(["--config", config_path.to_str().unwrap(), "auto", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.as_array().map(Vec::len), Some(2));
    assert_eq!(reports[1]["algorithm"], "radix");
    assert_eq!(reports[0]["corpus_size"], 26);
}

#[test]
fn test_disabled_algorithm_fails_build() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("triebench.toml");
    fs::write(
        &config_path,
        "[algorithms]\nenabled = [\"own-sequential\"]\n",
    )
    .unwrap();

    triebench_cmd()
        .args([
            "--config",
            config_path.to_str().unwrap(),
            "search",
            "-n",
            "1",
            "-a",
            "radix",
            "A",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRIE-002"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("triebench.toml");
    fs::write(&config_path, "[corpus]\nalphabet = \"\"\n").unwrap();

    triebench_cmd()
        .args(["--config", config_path.to_str().unwrap(), "generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corpus.alphabet"));
}
