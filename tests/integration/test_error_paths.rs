//! Error path integration tests.
//!
//! Validation failures, missing files and malformed inputs must fail the run with a non-zero
//! exit status and leave no report behind.

use std::fs;

use tempfile::TempDir;

use crate::helpers::{rankdigest, records_from_keys, write_input};

fn stderr_of(args: &[&str]) -> String {
    let result = rankdigest(args);
    assert!(!result.status.success(), "expected failure for {args:?}");
    String::from_utf8_lossy(&result.stderr).into_owned()
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.txt");
    let stderr =
        stderr_of(&["run", "-i", "/nonexistent/students.json", "-o", output.to_str().unwrap()]);
    assert!(stderr.contains("does not exist"));
    assert!(!output.exists());
}

#[test]
fn test_malformed_input_leaves_no_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    fs::write(&input, r#"{"students": [{"name": "x", "year": "not a year", "grade": 8.0}]}"#)
        .unwrap();

    let stderr = stderr_of(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(stderr.contains("Failed to load input records"));
    assert!(!output.exists());
}

#[test]
fn test_non_json_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    fs::write(&input, "name,year,grade\nx,2020,8.0\n").unwrap();

    let stderr = stderr_of(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(stderr.contains("Invalid input JSON file"));
}

#[test]
fn test_zero_threads_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    write_input(&input, records_from_keys(&[(2020, 9.0)]));

    let stderr = stderr_of(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-t",
        "0",
    ]);
    assert!(stderr.contains("Invalid parameter 'threads'"));
}

#[test]
fn test_zero_queue_capacity_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    write_input(&input, records_from_keys(&[(2020, 9.0)]));

    let stderr = stderr_of(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--queue-capacity",
        "0",
    ]);
    assert!(stderr.contains("Invalid parameter 'queue-capacity'"));
}

#[test]
fn test_nan_min_score_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    write_input(&input, records_from_keys(&[(2020, 9.0)]));

    let stderr = stderr_of(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--min-score",
        "NaN",
    ]);
    assert!(stderr.contains("min-score"));
}

#[test]
fn test_unknown_collector_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    write_input(&input, records_from_keys(&[(2020, 9.0)]));

    let stderr = stderr_of(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        "report.txt",
        "--collector",
        "lockfree",
    ]);
    assert!(stderr.contains("lockfree"));
}

#[test]
fn test_missing_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("missing").join("report.txt");
    write_input(&input, records_from_keys(&[(2020, 9.0)]));

    let stderr = stderr_of(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(stderr.contains("Directory does not exist"));
}
