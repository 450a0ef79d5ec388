//! Progress logging shared by worker threads.
//!
//! [`ProgressTracker`] keeps one atomic counter and logs a line each time the count crosses a
//! multiple of its interval, no matter which thread did the crossing.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of items between progress lines.
pub const DEFAULT_INTERVAL: u64 = 10_000;

/// Thread-safe counter that logs at regular intervals.
///
/// # Example
/// ```
/// use rankdigest_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Digested records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs "Digested records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    /// Creates a tracker with a count of 0 and an interval of [`DEFAULT_INTERVAL`].
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: DEFAULT_INTERVAL, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Sets the logging interval. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` to the count and logs once for every interval boundary crossed.
    ///
    /// Returns `true` if the count now sits exactly on a boundary.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let new_count = if additional == 0 {
            self.count.load(Ordering::Relaxed)
        } else {
            let prev = self.count.fetch_add(additional, Ordering::Relaxed);
            let new_count = prev + additional;
            for milestone in (prev / self.interval + 1)..=(new_count / self.interval) {
                info!("{} {}", self.message, milestone * self.interval);
            }
            new_count
        };
        new_count > 0 && new_count.is_multiple_of(self.interval)
    }

    /// Logs the final count unless the last boundary already reported it.
    pub fn log_final(&self) {
        if !self.log_if_needed(0) {
            let count = self.count();
            if count > 0 {
                info!("{} {} (complete)", self.message, count);
            }
        }
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
