//! Common CLI options shared across commands.
//!
//! Option groups are composed into command structs with `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use rankdigest_lib::collector::CollectorStrategy;
use rankdigest_lib::digest::DEFAULT_ITERATIONS;
use rankdigest_lib::pipeline::{DEFAULT_MIN_SCORE, PipelineConfig};
use rankdigest_lib::validation::{
    validate_file_exists, validate_finite, validate_optional_positive, validate_output_dir,
};

/// Input records and output report.
#[derive(Debug, Clone, Args)]
pub struct IoOptions {
    /// Input JSON file of records (`{"students": [...]}`)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output report file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl IoOptions {
    /// Validates that the input exists and the output directory is present.
    ///
    /// # Errors
    ///
    /// Returns an error if either check fails.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Input JSON")?;
        validate_output_dir(&self.output, "Output report")?;
        Ok(())
    }
}

/// Sizing of the worker pool, queue and collector.
#[derive(Debug, Clone, Default, Args)]
pub struct PoolOptions {
    /// Number of worker threads [default: a quarter of the input records, at least 1]
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Capacity of the work queue [default: half of the input records, at least 1]
    #[arg(short = 'q', long = "queue-capacity")]
    pub queue_capacity: Option<usize>,

    /// How worker results are merged into the ranked sequence
    #[arg(long = "collector", value_enum, default_value_t = CollectorStrategy::Channel)]
    pub collector: CollectorStrategy,
}

impl PoolOptions {
    /// Validates that explicit sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` or `queue_capacity` is 0.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_optional_positive(self.threads, "threads")?;
        validate_optional_positive(self.queue_capacity, "queue-capacity")?;
        Ok(())
    }
}

/// Digest and filter parameters.
#[derive(Debug, Clone, Args)]
pub struct DigestOptions {
    /// Keep records with a grade at or above this value
    #[arg(short = 'm', long = "min-score", default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: f64,

    /// Number of chained SHA-256 rounds per record
    #[arg(short = 'n', long = "iterations", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self { min_score: DEFAULT_MIN_SCORE, iterations: DEFAULT_ITERATIONS }
    }
}

impl DigestOptions {
    /// Validates that the threshold is a finite number.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_score` is NaN or infinite.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_finite(self.min_score, "min-score")?;
        Ok(())
    }
}

/// Combines option groups into the pipeline configuration.
#[must_use]
pub fn pipeline_config(pool: &PoolOptions, digest: &DigestOptions) -> PipelineConfig {
    PipelineConfig {
        threads: pool.threads,
        queue_capacity: pool.queue_capacity,
        min_score: digest.min_score,
        iterations: digest.iterations,
        collector: pool.collector,
    }
}
