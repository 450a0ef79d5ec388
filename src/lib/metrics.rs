//! Run metrics and TSV output.

use std::path::Path;

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::{Deserialize, Serialize};

use crate::pipeline::{PipelineConfig, RunSummary};

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name used in error messages.
    fn metric_name() -> &'static str;
}

/// Common interface for metrics that count inputs and outputs.
pub trait ProcessingMetrics {
    /// Items read.
    fn total_input(&self) -> u64;

    /// Items kept.
    fn total_output(&self) -> u64;

    /// Items filtered out.
    fn total_filtered(&self) -> u64;

    /// Output as a percentage of input.
    fn efficiency(&self) -> f64 {
        if self.total_input() == 0 {
            0.0
        } else {
            self.total_output() as f64 / self.total_input() as f64 * 100.0
        }
    }
}

/// One row describing a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Records read from the input.
    pub input_records: u64,
    /// Records with `grade >= min_score`.
    pub accepted_records: u64,
    /// Records below the threshold.
    pub rejected_records: u64,
    /// Filter threshold.
    pub min_score: f64,
    /// Digest rounds per record.
    pub iterations: u32,
    /// Worker threads.
    pub workers: u64,
    /// Queue capacity.
    pub queue_capacity: u64,
    /// `mutex` or `channel`.
    pub collector: String,
    /// Largest queue occupancy observed.
    pub peak_queue_len: u64,
    /// Times the feeder blocked on a full queue.
    pub producer_waits: u64,
    /// Times a worker blocked on an empty queue.
    pub consumer_waits: u64,
    /// Wall time in seconds.
    pub elapsed_seconds: f64,
}

impl RunMetrics {
    /// Builds the metrics row for a finished run.
    #[must_use]
    pub fn new(summary: &RunSummary, config: &PipelineConfig) -> Self {
        Self {
            input_records: summary.input_records as u64,
            accepted_records: summary.accepted_records as u64,
            rejected_records: summary.rejected_records() as u64,
            min_score: config.min_score,
            iterations: config.iterations,
            workers: summary.workers as u64,
            queue_capacity: summary.queue_capacity as u64,
            collector: summary.collector.to_string(),
            peak_queue_len: summary.queue_stats.peak_len as u64,
            producer_waits: summary.queue_stats.producer_waits,
            consumer_waits: summary.queue_stats.consumer_waits,
            elapsed_seconds: summary.elapsed.as_secs_f64(),
        }
    }
}

impl Metric for RunMetrics {
    fn metric_name() -> &'static str {
        "run"
    }
}

impl ProcessingMetrics for RunMetrics {
    fn total_input(&self) -> u64 {
        self.input_records
    }

    fn total_output(&self) -> u64 {
        self.accepted_records
    }

    fn total_filtered(&self) -> u64 {
        self.rejected_records
    }
}

/// Writes metrics to a TSV file, naming `description` in any error.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
/// ```no_run
/// use rankdigest_lib::metrics::{RunMetrics, write_metrics};
///
/// write_metrics("run_metrics.tsv", &[RunMetrics::default()], "run").unwrap();
/// ```
pub fn write_metrics<P: AsRef<Path>, T: Serialize>(
    path: P,
    metrics: &[T],
    description: &str,
) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default()
        .write_tsv(&path_ref, metrics)
        .with_context(|| format!("Failed to write {} metrics: {}", description, path_ref.display()))
}

/// Writes metrics using the type's own [`Metric::metric_name`] in errors.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_metrics_auto<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    write_metrics(path, metrics, T::metric_name())
}
