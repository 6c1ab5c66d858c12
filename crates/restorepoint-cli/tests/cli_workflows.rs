//! End-to-end workflows driven through the built `rpfilter` binary.
#![allow(missing_docs)]

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn cli_bin() -> &'static str {
    env!("CARGO_BIN_EXE_rpfilter")
}

fn run_cli(args: &[&str]) -> io::Result<Output> {
    Command::new(cli_bin()).args(args).output()
}

fn assert_cli_success(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_history(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

const SITE_A: &str = "\
VmName,CreationTime,Type
web-02,2023-05-10 08:00:00,Increment
db-01,2023-01-15 02:30:00,Full
web-02,2023-06-01 08:00:00,Increment
db-01,2022-11-20 02:30:00,Full
";

const SITE_B: &str = "\
VmName,CreationTime,Type
app-03,2023-03-05 04:00:00,Full
";

#[test]
fn reduce_writes_full_output_with_latest_rows() {
    let tmp = TempDir::new().unwrap();
    let input = write_history(tmp.path(), "site-a.csv", SITE_A);

    let output = run_cli(&["reduce", input.to_str().unwrap()]).unwrap();
    assert_cli_success(&output);

    let full = std::fs::read_to_string(tmp.path().join("site-a-filtered-full.csv")).unwrap();
    let lines: Vec<&str> = full.lines().collect();
    assert_eq!(lines[0], "VmName,CreationTime,Type");
    // One row per workload, ascending by key, latest timestamp kept.
    assert_eq!(lines[1], "db-01,2023-01-15 02:30:00,Full");
    assert_eq!(lines[2], "web-02,2023-06-01 08:00:00,Increment");
    assert_eq!(lines.len(), 3);
}

#[test]
fn reduce_minimal_and_skip_full_toggle_independently() {
    let tmp = TempDir::new().unwrap();
    let input = write_history(tmp.path(), "site-a.csv", SITE_A);

    let output = run_cli(&[
        "reduce",
        "--minimal",
        "--skip-full",
        input.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    assert!(!tmp.path().join("site-a-filtered-full.csv").exists());
    let minimal =
        std::fs::read_to_string(tmp.path().join("site-a-filtered-minimal.csv")).unwrap();
    let lines: Vec<&str> = minimal.lines().collect();
    assert_eq!(lines[0], "VmName,CreationTime");
    assert_eq!(lines[1], "db-01,2023-01-15 02:30:00");
    assert_eq!(lines[2], "web-02,2023-06-01 08:00:00");
}

#[test]
fn reduce_applies_the_date_window() {
    let tmp = TempDir::new().unwrap();
    let input = write_history(tmp.path(), "site-a.csv", SITE_A);

    let output = run_cli(&[
        "reduce",
        "--date-start",
        "2023-02-01",
        "--date-end",
        "2023-08-01",
        input.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    let full = std::fs::read_to_string(tmp.path().join("site-a-filtered-full.csv")).unwrap();
    let lines: Vec<&str> = full.lines().collect();
    // db-01's latest restore point (2023-01-15) precedes the window.
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "web-02,2023-06-01 08:00:00,Increment");
}

#[test]
fn reduce_respects_output_dir() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("reduced");
    let input = write_history(tmp.path(), "site-a.csv", SITE_A);

    let output = run_cli(&[
        "reduce",
        "--output-dir",
        out.to_str().unwrap(),
        input.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    assert!(out.join("site-a-filtered-full.csv").exists());
}

#[test]
fn missing_input_is_skipped_and_batch_continues() {
    let tmp = TempDir::new().unwrap();
    let first = write_history(tmp.path(), "one.csv", SITE_A);
    let missing = tmp.path().join("two.csv");
    let third = write_history(tmp.path(), "three.csv", SITE_B);

    let output = run_cli(&[
        "reduce",
        first.to_str().unwrap(),
        missing.to_str().unwrap(),
        third.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    assert!(tmp.path().join("one-filtered-full.csv").exists());
    assert!(!tmp.path().join("two-filtered-full.csv").exists());
    assert!(tmp.path().join("three-filtered-full.csv").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("two.csv"), "stderr:\n{stderr}");
}

#[test]
fn malformed_timestamps_skip_only_that_input() {
    let tmp = TempDir::new().unwrap();
    let good = write_history(tmp.path(), "good.csv", SITE_B);
    let bad = write_history(
        tmp.path(),
        "bad.csv",
        "VmName,CreationTime\nvm-x,sometime last week\n",
    );

    let output = run_cli(&["reduce", good.to_str().unwrap(), bad.to_str().unwrap()]).unwrap();
    assert_cli_success(&output);

    assert!(tmp.path().join("good-filtered-full.csv").exists());
    assert!(!tmp.path().join("bad-filtered-full.csv").exists());
}

#[test]
fn merge_tags_rows_with_their_source() {
    let tmp = TempDir::new().unwrap();
    let a = write_history(tmp.path(), "site-a.csv", SITE_A);
    let b = write_history(tmp.path(), "site-b.csv", SITE_B);
    let merged_path = tmp.path().join("merged.csv");

    let output = run_cli(&[
        "merge",
        "--output",
        merged_path.to_str().unwrap(),
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    let merged = std::fs::read_to_string(&merged_path).unwrap();
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines[0], "VmName,CreationTime,Type,SourceFile");
    assert_eq!(lines[1], "db-01,2023-01-15 02:30:00,Full,site-a.csv");
    assert_eq!(lines[2], "web-02,2023-06-01 08:00:00,Increment,site-a.csv");
    assert_eq!(lines[3], "app-03,2023-03-05 04:00:00,Full,site-b.csv");
    assert_eq!(lines.len(), 4);
}

#[test]
fn merge_excludes_missing_sources() {
    let tmp = TempDir::new().unwrap();
    let a = write_history(tmp.path(), "site-a.csv", SITE_A);
    let gone = tmp.path().join("gone.csv");
    let b = write_history(tmp.path(), "site-b.csv", SITE_B);
    let merged_path = tmp.path().join("merged.csv");

    let output = run_cli(&[
        "merge",
        "--output",
        merged_path.to_str().unwrap(),
        a.to_str().unwrap(),
        gone.to_str().unwrap(),
        b.to_str().unwrap(),
    ])
    .unwrap();
    assert_cli_success(&output);

    let merged = std::fs::read_to_string(&merged_path).unwrap();
    assert!(!merged.contains("gone.csv"));
    assert!(merged.contains("site-a.csv"));
    assert!(merged.contains("site-b.csv"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Merged 2 of 3"), "stdout:\n{stdout}");
}

#[test]
fn incomplete_window_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    let input = write_history(tmp.path(), "site-a.csv", SITE_A);

    let output = run_cli(&[
        "reduce",
        "--date-start",
        "2023-01-01",
        input.to_str().unwrap(),
    ])
    .unwrap();
    assert!(!output.status.success());
}
