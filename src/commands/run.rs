//! Digest, filter and rank a batch of records.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use rankdigest_lib::io::{JsonRecordSource, ReportFile};
use rankdigest_lib::logging::{OperationTimer, log_run_summary};
use rankdigest_lib::metrics::{RunMetrics, write_metrics_auto};
use rankdigest_lib::pipeline::Pipeline;

use crate::commands::command::Command;
use crate::commands::common::{DigestOptions, IoOptions, PoolOptions, pipeline_config};

/// Digest every record on a worker pool and write the ranked survivors.
#[derive(Debug, Parser)]
#[command(
    name = "run",
    about = "\x1b[38;5;72m[RANKING]\x1b[0m        \x1b[36mDigest, filter and rank a batch of records\x1b[0m",
    long_about = r#"
Digest, filter and rank a batch of records.

Records are read from a JSON file of the form {"students": [{"name", "year", "grade",
"gender", "username"}, ...]} and pushed through a bounded queue to a pool of worker threads.
Each worker computes a chained SHA-256 digest of its record and keeps the record if its grade
is at least --min-score. Kept records are merged into a single sequence ordered by year
(descending), then grade (descending), then input order.

The report has one header line followed by one fixed-width line per kept record:
name, username, year, grade and the hex digest.

Example usage:
  rankdigest run -i students.json -o report.txt
  rankdigest run -i students.json -o report.txt -t 8 -q 16 --collector mutex
  rankdigest run -i students.json -o report.txt --metrics run_metrics.tsv
"#
)]
pub struct Run {
    /// Input/output options
    #[command(flatten)]
    pub io: IoOptions,

    /// Worker pool options
    #[command(flatten)]
    pub pool: PoolOptions,

    /// Digest and filter options
    #[command(flatten)]
    pub digest: DigestOptions,

    /// Optional output TSV of run metrics
    #[arg(long = "metrics")]
    pub metrics: Option<PathBuf>,
}

impl Command for Run {
    fn execute(&self, _command_line: &str) -> Result<()> {
        self.io.validate()?;
        self.pool.validate()?;
        self.digest.validate()?;

        info!("Starting Run");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        info!("Min score: {}", self.digest.min_score);
        info!("Digest iterations: {}", self.digest.iterations);
        if let Some(metrics) = &self.metrics {
            info!("Metrics: {}", metrics.display());
        }

        let timer = OperationTimer::new("Ranking records");
        let config = pipeline_config(&self.pool, &self.digest);
        let mut source = JsonRecordSource::new(&self.io.input);
        let mut writer = ReportFile::new(&self.io.output);

        let summary = Pipeline::new(config.clone()).run(&mut source, &mut writer)?;
        log_run_summary(&summary);

        if let Some(path) = &self.metrics {
            write_metrics_auto(path, &[RunMetrics::new(&summary, &config)])?;
        }

        timer.log_completion(summary.input_records as u64);
        Ok(())
    }
}
