//! Rank-ordered collection of digest results.
//!
//! Workers insert results concurrently; the sequence stays sorted (best first) after every
//! insertion. Two strategies share the same sorted core, [`RankedResults`]:
//!
//! - [`SharedCollector`]: one exclusive lock around insert-with-shift.
//! - [`CollectorActor`]: a single collector thread owns the sequence and receives results over
//!   a channel. When every sender is dropped the channel disconnects, the thread returns the
//!   sequence, and joining it yields the snapshot.
//!
//! Either way the [`Snapshot`] can only be taken by consuming the collector, which the
//! orchestrator can do only after every worker has been joined.
//!
//! ```text
//!  worker 0 ─┐
//!  worker 1 ─┼──> ResultSink::insert ──> RankedResults (sorted Vec) ──> Snapshot
//!  worker N ─┘
//! ```

use std::fmt;
use std::thread::{self, JoinHandle};

use clap::ValueEnum;
use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;

use crate::digest::DigestResult;
use crate::errors::{RankError, Result};

/// Sorted sequence of results, best ranked first.
///
/// Not synchronized; see [`SharedCollector`] and [`CollectorActor`] for the concurrent wrappers.
#[derive(Debug, Default)]
pub struct RankedResults {
    results: Vec<DigestResult>,
}

impl RankedResults {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `result` at its rank position and returns that position.
    ///
    /// The position is the first index whose current element does not strictly outrank
    /// `result`; everything from there on shifts one slot later. If every element outranks it,
    /// the result is appended.
    pub fn insert(&mut self, result: DigestResult) -> usize {
        let index = self.results.partition_point(|existing| existing.outranks(&result));
        self.results.insert(index, result);
        index
    }

    /// Number of results held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if no results are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The results in rank order.
    #[must_use]
    pub fn as_slice(&self) -> &[DigestResult] {
        &self.results
    }

    /// Freezes the sequence.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        debug_assert!(is_ranked(&self.results), "RankedResults lost its ordering");
        Snapshot { results: self.results }
    }
}

/// Immutable, rank-ordered results of a finished run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    results: Vec<DigestResult>,
}

impl Snapshot {
    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if no record passed the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The results in rank order.
    #[must_use]
    pub fn as_slice(&self) -> &[DigestResult] {
        &self.results
    }

    /// Iterates the results in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, DigestResult> {
        self.results.iter()
    }

    /// True if no result is placed behind one it outranks.
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        is_ranked(&self.results)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a DigestResult;
    type IntoIter = std::slice::Iter<'a, DigestResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

fn is_ranked(results: &[DigestResult]) -> bool {
    results.windows(2).all(|pair| !pair[1].outranks(&pair[0]))
}

/// Destination for results produced by workers.
pub trait ResultSink: Sync {
    /// Adds one result.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector can no longer accept results.
    fn insert(&self, result: DigestResult) -> Result<()>;
}

/// Lock-based collector: every insert holds one exclusive lock for its search and shift.
#[derive(Debug, Default)]
pub struct SharedCollector {
    inner: Mutex<RankedResults>,
}

impl SharedCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results inserted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the collector and returns the ordered results.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        self.inner.into_inner().into_snapshot()
    }
}

impl ResultSink for SharedCollector {
    fn insert(&self, result: DigestResult) -> Result<()> {
        self.inner.lock().insert(result);
        Ok(())
    }
}

/// Channel-based collector: one thread owns the sequence and applies inserts in arrival order.
pub struct CollectorActor {
    sender: Sender<DigestResult>,
    handle: JoinHandle<RankedResults>,
}

impl CollectorActor {
    /// Starts the collector thread.
    #[must_use]
    pub fn spawn() -> Self {
        let (sender, receiver) = unbounded();
        let handle = thread::spawn(move || Self::collect_loop(receiver));
        Self { sender, handle }
    }

    /// Collector thread main loop; returns once every sender has been dropped.
    #[allow(clippy::needless_pass_by_value)]
    fn collect_loop(receiver: Receiver<DigestResult>) -> RankedResults {
        let mut ranked = RankedResults::new();
        for result in receiver {
            ranked.insert(result);
        }
        log::debug!("Collector thread received {} results", ranked.len());
        ranked
    }

    /// Returns a sender for workers. Drop it when the worker is done.
    #[must_use]
    pub fn handle(&self) -> CollectorHandle {
        CollectorHandle { sender: self.sender.clone() }
    }

    /// Drops the actor's own sender, waits for the collector thread and returns its results.
    ///
    /// Blocks until every [`CollectorHandle`] has been dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::CollectorPanicked`] if the collector thread panicked.
    pub fn finish(self) -> Result<Snapshot> {
        let Self { sender, handle } = self;
        drop(sender);
        handle.join().map(RankedResults::into_snapshot).map_err(|_| RankError::CollectorPanicked)
    }
}

/// Worker-side end of a [`CollectorActor`].
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    sender: Sender<DigestResult>,
}

impl ResultSink for CollectorHandle {
    fn insert(&self, result: DigestResult) -> Result<()> {
        self.sender.send(result).map_err(|_| RankError::CollectorPanicked)
    }
}

/// How results are merged into rank order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollectorStrategy {
    /// Exclusive lock around each insert.
    #[value(name = "mutex")]
    Mutex,

    /// Dedicated collector thread fed over a channel.
    #[default]
    #[value(name = "channel")]
    Channel,
}

impl fmt::Display for CollectorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutex => write!(f, "mutex"),
            Self::Channel => write!(f, "channel"),
        }
    }
}
