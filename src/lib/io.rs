//! Input and output collaborators of the pipeline.
//!
//! Records are read from a JSON document of the form `{"students": [ ... ]}` and ranked results
//! are written as a fixed-column text report.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::collector::Snapshot;
use crate::digest::DigestResult;
use crate::errors::RankError;
use crate::record::Record;

/// Supplies the batch of records for one run.
pub trait RecordSource {
    /// Loads every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or parsed.
    fn load(&mut self) -> Result<Vec<Record>>;
}

/// Receives the ranked results once a run is finalized.
pub trait ResultWriter {
    /// Writes every result in rank order.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn write(&mut self, results: &Snapshot) -> Result<()>;
}

/// On-disk layout of an input file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    students: Vec<Record>,
}

/// Reads records from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    /// Creates a source for `path`; nothing is read until [`RecordSource::load`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// The input path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn invalid(&self, reason: String) -> RankError {
        RankError::InvalidFileFormat {
            file_type: "input JSON".to_string(),
            path: self.path.display().to_string(),
            reason,
        }
    }
}

impl RecordSource for JsonRecordSource {
    fn load(&mut self) -> Result<Vec<Record>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open input file: {}", self.path.display()))?;
        let parsed: RecordFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| self.invalid(e.to_string()))?;

        if let Some((index, record)) =
            parsed.students.iter().enumerate().find(|(_, r)| !r.grade.is_finite())
        {
            return Err(self
                .invalid(format!("record {index} ('{}') has a non-finite grade", record.name))
                .into());
        }
        Ok(parsed.students)
    }
}

/// Serves records already in memory.
#[derive(Debug, Clone, Default)]
pub struct VecRecordSource {
    records: Vec<Record>,
}

impl VecRecordSource {
    /// Wraps `records`; they are handed out by the first [`RecordSource::load`].
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for VecRecordSource {
    fn load(&mut self) -> Result<Vec<Record>> {
        Ok(std::mem::take(&mut self.records))
    }
}

/// Writes `records` as an input file that [`JsonRecordSource`] can read back.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_records_json<P: AsRef<Path>>(path: P, records: Vec<Record>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &RecordFile { students: records })
        .with_context(|| format!("Failed to write records to {}", path.display()))?;
    writer.flush().with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

/// Header line of the report.
#[must_use]
pub fn report_header() -> String {
    format!("Name: {:<12} |UserName: {:<10} |Year: {:<5} |Grade: {:<5} |Hash: ", "", "", "", "")
}

/// One report line for `result`.
#[must_use]
pub fn report_line(result: &DigestResult) -> String {
    let record = &result.record;
    format!(
        "{:<18} |{:<20} |{:<11} |{:<12} |{}",
        record.name,
        record.username,
        record.year,
        record.grade,
        result.hex_digest()
    )
}

/// Fixed-column text report.
///
/// ```text
/// Name:              |UserName:            |Year:       |Grade:       |Hash:
/// Ona                |ona20                |2020        |9            |3f1c...
/// ```
pub struct ReportWriter<W: Write> {
    inner: W,
}

impl ReportWriter<BufWriter<File>> {
    /// Creates (or truncates) the report at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wraps an arbitrary writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResultWriter for ReportWriter<W> {
    fn write(&mut self, results: &Snapshot) -> Result<()> {
        writeln!(self.inner, "{}", report_header()).context("Failed to write report header")?;
        for result in results {
            writeln!(self.inner, "{}", report_line(result)).context("Failed to write report line")?;
        }
        self.inner.flush().context("Failed to flush report")?;
        Ok(())
    }
}

/// Report written to a path, created only once results are ready.
///
/// A run that fails before finalizing leaves no output file behind.
#[derive(Debug, Clone)]
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    /// Targets `path`; nothing is created until [`ResultWriter::write`].
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl ResultWriter for ReportFile {
    fn write(&mut self, results: &Snapshot) -> Result<()> {
        ReportWriter::to_path(&self.path)?.write(results)
    }
}
