//! Tests for the `run` command.

use std::fs;

use rankdigest_lib::digest::Digester;
use rankdigest_lib::record::Record;
use tempfile::TempDir;

use crate::helpers::{keys, rankdigest, read_report, records_from_keys, write_input};

const SCENARIO: &[(i32, f64)] = &[(2020, 8.5), (2020, 9.0), (2019, 6.0), (2021, 5.0), (2019, 9.9)];

#[test]
fn test_run_ranks_and_filters() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    write_input(&input, records_from_keys(SCENARIO));

    let result = rankdigest(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--iterations",
        "10",
    ]);
    assert!(result.status.success(), "run failed: {}", String::from_utf8_lossy(&result.stderr));

    let rows = read_report(&output);
    assert_eq!(keys(&rows), vec![(2020, 9.0), (2020, 8.5), (2019, 9.9)]);
    assert_eq!(rows[0].name, "s1");
    assert_eq!(rows[0].username, "user1");
}

#[test]
fn test_report_hash_matches_library_digest() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    let record = Record::new("Ona", "ona20", "F", 2020, 9.5);
    write_input(&input, vec![record.clone()]);

    let result = rankdigest(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(result.status.success());

    let rows = read_report(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].hash, hex::encode(Digester::default().digest(&record)));
}

#[test]
fn test_collector_strategies_write_identical_reports() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let grid: Vec<(i32, f64)> =
        (0..60).map(|i| (2015 + i % 4, f64::from(60 + (i * 7) % 40) / 10.0)).collect();
    write_input(&input, records_from_keys(&grid));

    let mut reports = Vec::new();
    for collector in ["mutex", "channel"] {
        let output = temp_dir.path().join(format!("{collector}.txt"));
        let result = rankdigest(&[
            "run",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-n",
            "5",
            "-t",
            "6",
            "-q",
            "3",
            "--collector",
            collector,
        ]);
        assert!(result.status.success(), "{collector} run failed");
        reports.push(fs::read_to_string(&output).unwrap());
    }
    assert_eq!(reports[0], reports[1]);
}

#[test]
fn test_min_score_threshold_is_inclusive() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    write_input(&input, records_from_keys(&[(2020, 4.9), (2020, 5.0), (2019, 5.1)]));

    let result = rankdigest(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-m",
        "5",
        "-n",
        "1",
    ]);
    assert!(result.status.success());
    assert_eq!(keys(&read_report(&output)), vec![(2020, 5.0), (2019, 5.1)]);
}

#[test]
fn test_run_writes_metrics() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    let metrics = temp_dir.path().join("metrics.tsv");
    write_input(&input, records_from_keys(SCENARIO));

    let result = rankdigest(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-n",
        "3",
        "--collector",
        "mutex",
        "--metrics",
        metrics.to_str().unwrap(),
    ]);
    assert!(result.status.success());

    let content = fs::read_to_string(&metrics).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let header: Vec<&str> = lines[0].split('\t').collect();
    let values: Vec<&str> = lines[1].split('\t').collect();
    let field = |name: &str| values[header.iter().position(|h| *h == name).unwrap()];

    assert_eq!(field("input_records"), "5");
    assert_eq!(field("accepted_records"), "3");
    assert_eq!(field("rejected_records"), "2");
    assert_eq!(field("workers"), "1");
    assert_eq!(field("queue_capacity"), "2");
    assert_eq!(field("collector"), "mutex");
}

#[test]
fn test_empty_input_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("students.json");
    let output = temp_dir.path().join("report.txt");
    fs::write(&input, r#"{"students": []}"#).unwrap();

    let result = rankdigest(&["run", "-i", input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(result.status.success());
    assert!(read_report(&output).is_empty());
}
