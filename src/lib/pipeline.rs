//! Orchestration of one batch run.
//!
//! A [`Pipeline`] walks a fixed sequence of phases:
//!
//! ```text
//! Idle ──> Loading ──> Running ──> Draining ──> Finalized
//!          load all    start pool, close queue,  snapshot,
//!          records     feed queue  join workers  write report
//! ```
//!
//! Closing the queue after the last `put` is the only "no more work" signal. Workers observe
//! it as [`Take::EndOfInput`](crate::queue::Take::EndOfInput) and exit; joining them is the
//! drain barrier, after which the collector is consumed into a [`Snapshot`]. Nothing is
//! retried: any load, worker or write failure ends the run.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::info;

use crate::collector::{
    CollectorActor, CollectorStrategy, ResultSink, SharedCollector, Snapshot,
};
use crate::digest::{DEFAULT_ITERATIONS, Digester};
use crate::errors::Result;
use crate::io::{RecordSource, ResultWriter};
use crate::pool::{DigestTask, WorkerPool};
use crate::progress::ProgressTracker;
use crate::queue::{QueueStats, WorkQueue};
use crate::record::Record;

/// Default filter threshold: keep records with `grade >= 7`.
pub const DEFAULT_MIN_SCORE: f64 = 7.0;

/// Records per progress line.
const PROGRESS_INTERVAL: u64 = 1_000;

/// Run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Worker count; `None` means a quarter of the input size.
    pub threads: Option<usize>,
    /// Queue capacity; `None` means half of the input size.
    pub queue_capacity: Option<usize>,
    /// Filter threshold on `grade`.
    pub min_score: f64,
    /// Chained digest rounds per record.
    pub iterations: u32,
    /// How results are merged.
    pub collector: CollectorStrategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: None,
            queue_capacity: None,
            min_score: DEFAULT_MIN_SCORE,
            iterations: DEFAULT_ITERATIONS,
            collector: CollectorStrategy::default(),
        }
    }
}

impl PipelineConfig {
    /// Number of workers for an input of `input_len` records (at least 1).
    #[must_use]
    pub fn worker_count(&self, input_len: usize) -> usize {
        self.threads.unwrap_or(input_len / 4).max(1)
    }

    /// Queue capacity for an input of `input_len` records (at least 1).
    #[must_use]
    pub fn queue_capacity(&self, input_len: usize) -> usize {
        self.queue_capacity.unwrap_or(input_len / 2).max(1)
    }
}

/// Lifecycle phase of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Created, nothing loaded.
    Idle,
    /// Reading input records.
    Loading,
    /// Workers started; the feeder is filling the queue.
    Running,
    /// Queue closed; waiting for workers to exit.
    Draining,
    /// Results frozen.
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Records fed into the queue.
    pub input_records: usize,
    /// Records that passed the filter.
    pub accepted_records: usize,
    /// Workers started.
    pub workers: usize,
    /// Capacity of the work queue.
    pub queue_capacity: usize,
    /// Collector used.
    pub collector: CollectorStrategy,
    /// Queue wait and occupancy counters.
    pub queue_stats: QueueStats,
    /// Wall time from start of feeding to frozen results.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Records that failed the filter.
    #[must_use]
    pub fn rejected_records(&self) -> usize {
        self.input_records - self.accepted_records
    }
}

/// Ranked results together with the run summary.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Results in rank order.
    pub snapshot: Snapshot,
    /// Counters for the run.
    pub summary: RunSummary,
}

/// Single-use orchestrator for one batch.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    phase: Phase,
}

impl Pipeline {
    /// Creates an idle pipeline.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, phase: Phase::Idle }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The run parameters.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn advance(&mut self, next: Phase) {
        assert!(next > self.phase, "Pipeline cannot move from {} to {next}", self.phase);
        info!("Pipeline phase: {} -> {next}", self.phase);
        self.phase = next;
    }

    /// Loads records from `source`, ranks them and hands the results to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, any worker, or writing fails.
    pub fn run<R, W>(mut self, source: &mut R, writer: &mut W) -> anyhow::Result<RunSummary>
    where
        R: RecordSource + ?Sized,
        W: ResultWriter + ?Sized,
    {
        self.advance(Phase::Loading);
        let records = source.load().context("Failed to load input records")?;
        info!("Loaded {} records", records.len());

        let outcome = self.execute(records)?;
        writer.write(&outcome.snapshot).context("Failed to write ranked results")?;
        Ok(outcome.summary)
    }

    /// Ranks an in-memory batch: Running, Draining and Finalized.
    ///
    /// Each record's ordinal is set to its position in `records`, so ties on year and grade
    /// come out in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker or the collector thread fails.
    ///
    /// # Panics
    ///
    /// Panics if the pipeline has already run.
    pub fn execute(&mut self, records: Vec<Record>) -> Result<RunOutcome> {
        if self.phase == Phase::Idle {
            self.advance(Phase::Loading);
        }
        let start = Instant::now();
        let input_records = records.len();
        let workers = self.config.worker_count(input_records);
        let capacity = self.config.queue_capacity(input_records);
        let task = DigestTask::new(Digester::new(self.config.iterations), self.config.min_score);
        let queue = WorkQueue::new(capacity);
        let progress = ProgressTracker::new("Digested records").with_interval(PROGRESS_INTERVAL);

        info!(
            "Ranking {input_records} records with {workers} workers, queue capacity {capacity}, \
             {} collector",
            self.config.collector
        );
        self.advance(Phase::Running);

        let snapshot = match self.config.collector {
            CollectorStrategy::Mutex => {
                let collector = SharedCollector::new();
                self.feed_and_drain(records, &queue, &task, &collector, &progress, workers)?;
                collector.into_snapshot()
            }
            CollectorStrategy::Channel => {
                let actor = CollectorActor::spawn();
                let handle = actor.handle();
                let drained =
                    self.feed_and_drain(records, &queue, &task, &handle, &progress, workers);
                drop(handle);
                let snapshot = actor.finish();
                drained?;
                snapshot?
            }
        };
        progress.log_final();
        self.advance(Phase::Finalized);

        Ok(RunOutcome {
            summary: RunSummary {
                input_records,
                accepted_records: snapshot.len(),
                workers,
                queue_capacity: capacity,
                collector: self.config.collector,
                queue_stats: queue.stats(),
                elapsed: start.elapsed(),
            },
            snapshot,
        })
    }

    /// Starts the pool, feeds every record, closes the queue and joins the workers.
    fn feed_and_drain<S: ResultSink + ?Sized>(
        &mut self,
        records: Vec<Record>,
        queue: &WorkQueue<Arc<Record>>,
        task: &DigestTask,
        sink: &S,
        progress: &ProgressTracker,
        workers: usize,
    ) -> Result<()> {
        thread::scope(|scope| {
            let pool = WorkerPool::spawn(scope, workers, queue, task, sink, progress);
            for (ordinal, record) in records.into_iter().enumerate() {
                queue.put(Arc::new(record.with_ordinal(ordinal)));
            }
            queue.close();

            self.advance(Phase::Draining);
            pool.join()
        })
    }
}
