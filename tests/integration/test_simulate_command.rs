//! Tests for the `simulate` command.

use std::fs;

use rankdigest_lib::io::{JsonRecordSource, RecordSource};
use tempfile::TempDir;

use crate::helpers::{rankdigest, read_report};

#[test]
fn test_simulate_writes_requested_count() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("students.json");

    let result =
        rankdigest(&["simulate", "-o", output.to_str().unwrap(), "-n", "250", "--seed", "42"]);
    assert!(result.status.success());

    let records = JsonRecordSource::new(&output).load().unwrap();
    assert_eq!(records.len(), 250);
}

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.json");
    let second = temp_dir.path().join("b.json");

    for output in [&first, &second] {
        let result =
            rankdigest(&["simulate", "-o", output.to_str().unwrap(), "-n", "40", "--seed", "7"]);
        assert!(result.status.success());
    }
    assert_eq!(fs::read_to_string(&first).unwrap(), fs::read_to_string(&second).unwrap());
}

#[test]
fn test_simulated_input_runs_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");

    assert!(
        rankdigest(&["simulate", "-o", input.to_str().unwrap(), "-n", "120", "--seed", "3"])
            .status
            .success()
    );
    assert!(
        rankdigest(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap(), "-n", "2"])
            .status
            .success()
    );

    let expected = JsonRecordSource::new(&input)
        .load()
        .unwrap()
        .iter()
        .filter(|r| r.grade >= 7.0)
        .count();
    let rows = read_report(&output);
    assert_eq!(rows.len(), expected);
    assert!(rows.iter().all(|r| r.grade >= 7.0));
    assert!(rows.windows(2).all(|w| (w[0].year, w[0].grade) >= (w[1].year, w[1].grade)));
}

#[test]
fn test_simulate_rejects_zero_count() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("students.json");
    let result = rankdigest(&["simulate", "-o", output.to_str().unwrap(), "-n", "0"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("count"));
}
