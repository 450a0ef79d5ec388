//! Fixed-size pool of digest workers.
//!
//! Each worker loops: take a record from the [`WorkQueue`], digest it, keep it if its grade
//! meets the threshold, and insert the result into a [`ResultSink`]. A worker exits when the
//! queue reports [`Take::EndOfInput`]. Workers keep nothing between iterations.
//!
//! Workers run as scoped threads so they can borrow the queue, task and sink owned by the
//! orchestrator; [`WorkerPool::join`] is the drain barrier.

use std::sync::Arc;
use std::thread::{Scope, ScopedJoinHandle};

use log::{debug, error};

use crate::collector::ResultSink;
use crate::digest::{DigestResult, Digester};
use crate::errors::{RankError, Result};
use crate::progress::ProgressTracker;
use crate::queue::{Take, WorkQueue};
use crate::record::Record;

/// Per-record work: digest, then filter on `grade >= min_score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestTask {
    digester: Digester,
    min_score: f64,
}

impl DigestTask {
    /// Creates a task with the given digester and filter threshold.
    #[must_use]
    pub fn new(digester: Digester, min_score: f64) -> Self {
        Self { digester, min_score }
    }

    /// The filter threshold.
    #[must_use]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Digests `record` and returns the result if the record passes the filter.
    ///
    /// The digest is always computed; filtering happens afterwards.
    #[must_use]
    pub fn process(&self, record: Arc<Record>) -> Option<DigestResult> {
        let digest = self.digester.digest(&record);
        record.passes(self.min_score).then(|| DigestResult::new(record, digest))
    }
}

/// Runs one worker until the queue reports end of input.
///
/// If the sink rejects a result the worker stops digesting but keeps taking records until end
/// of input, so a producer blocked on a full queue is always released. The first sink error is
/// returned.
///
/// # Errors
///
/// Returns the first error reported by `sink`.
pub fn worker_loop<S: ResultSink + ?Sized>(
    worker: usize,
    queue: &WorkQueue<Arc<Record>>,
    task: &DigestTask,
    sink: &S,
    progress: &ProgressTracker,
) -> Result<()> {
    debug!("Worker {worker} started");
    let mut failure = None;

    while let Take::Item(record) = queue.take() {
        if failure.is_none() {
            if let Some(result) = task.process(record) {
                if let Err(e) = sink.insert(result) {
                    error!("Worker {worker} could not store a result: {e}");
                    failure = Some(e);
                }
            }
        }
        progress.log_if_needed(1);
    }

    debug!("Worker {worker} observed end of input");
    failure.map_or(Ok(()), Err)
}

/// Handles of the running workers.
pub struct WorkerPool<'scope> {
    handles: Vec<ScopedJoinHandle<'scope, Result<()>>>,
}

impl<'scope> WorkerPool<'scope> {
    /// Starts `size` workers inside `scope`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0; nothing would ever drain the queue.
    pub fn spawn<'env, S: ResultSink + ?Sized>(
        scope: &'scope Scope<'scope, 'env>,
        size: usize,
        queue: &'scope WorkQueue<Arc<Record>>,
        task: &'scope DigestTask,
        sink: &'scope S,
        progress: &'scope ProgressTracker,
    ) -> Self {
        assert!(size > 0, "WorkerPool size must be > 0");
        let handles = (0..size)
            .map(|worker| scope.spawn(move || worker_loop(worker, queue, task, sink, progress)))
            .collect();
        Self { handles }
    }

    /// Number of workers started.
    #[must_use]
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to exit.
    ///
    /// All workers are joined even if one fails, so no thread outlives the call.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::WorkerPanicked`] for the first worker that panicked, or the first
    /// error a worker returned.
    pub fn join(self) -> Result<()> {
        let mut first_error = None;
        for (worker, handle) in self.handles.into_iter().enumerate() {
            let outcome = handle.join().map_err(|_| RankError::WorkerPanicked { worker });
            if let Err(e) = outcome.and_then(|r| r) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
