//! Helper utilities for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use rankdigest_lib::io::write_records_json;
use rankdigest_lib::record::Record;

/// One parsed report line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub username: String,
    pub year: i32,
    pub grade: f64,
    pub hash: String,
}

/// Builds records from `(year, grade)` pairs, naming them `s0`, `s1`, ... in order.
pub fn records_from_keys(keys: &[(i32, f64)]) -> Vec<Record> {
    keys.iter()
        .enumerate()
        .map(|(i, &(year, grade))| Record::new(format!("s{i}"), format!("user{i}"), "F", year, grade))
        .collect()
}

/// Writes an input JSON file.
pub fn write_input(path: &Path, records: Vec<Record>) {
    write_records_json(path, records).expect("Failed to write input JSON");
}

/// Runs the binary with `args`.
pub fn rankdigest(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rankdigest"))
        .args(args)
        .output()
        .expect("Failed to run rankdigest")
}

/// Parses a report written by `rankdigest run`, skipping the header.
pub fn read_report(path: &Path) -> Vec<ReportRow> {
    let content = std::fs::read_to_string(path).expect("Failed to read report");
    let mut lines = content.lines();
    let header = lines.next().expect("Report should have a header");
    assert!(header.starts_with("Name:"), "Unexpected header: {header}");

    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(" |").map(str::trim).collect();
            assert_eq!(fields.len(), 5, "Unexpected report line: {line}");
            ReportRow {
                name: fields[0].to_string(),
                username: fields[1].to_string(),
                year: fields[2].parse().expect("year"),
                grade: fields[3].parse().expect("grade"),
                hash: fields[4].to_string(),
            }
        })
        .collect()
}

/// `(year, grade)` of each row.
pub fn keys(rows: &[ReportRow]) -> Vec<(i32, f64)> {
    rows.iter().map(|r| (r.year, r.grade)).collect()
}
