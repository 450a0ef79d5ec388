//! Formatting helpers and summary logging for batch runs.

use std::time::{Duration, Instant};

use log::info;

use crate::pipeline::RunSummary;

/// Formats a count with thousands separators.
///
/// # Examples
///
/// ```
/// use rankdigest_lib::logging::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` places.
///
/// # Examples
///
/// ```
/// use rankdigest_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats a duration as e.g. "45s", "2m 15s" or "1h 30m".
///
/// Durations under ten seconds keep millisecond precision, since most batches finish quickly.
///
/// # Examples
///
/// ```
/// use rankdigest_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 10 {
        format!("{:.3}s", duration.as_secs_f64())
    } else if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate, falling back to items per minute below one per second.
///
/// # Examples
///
/// ```
/// use rankdigest_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1)), "1,000 records/s");
/// assert_eq!(format_rate(30, Duration::from_secs(60)), "30.0 records/min");
/// ```
#[must_use]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        let per_min = count as f64 / (secs / 60.0);
        format!("{per_min:.1} records/min")
    }
}

/// Logs the outcome of a run.
pub fn log_run_summary(summary: &RunSummary) {
    let input = summary.input_records as u64;
    let accepted = summary.accepted_records as u64;
    let fraction = if input == 0 { 0.0 } else { accepted as f64 / input as f64 };

    info!("Run summary:");
    info!("  Input records: {}", format_count(input));
    info!("  Accepted records: {} ({})", format_count(accepted), format_percent(fraction, 2));
    info!("  Rejected records: {}", format_count(summary.rejected_records() as u64));
    info!(
        "  Workers: {}, queue capacity: {}, collector: {}",
        summary.workers, summary.queue_capacity, summary.collector
    );
    info!(
        "  Queue peak: {}, producer waits: {}, consumer waits: {}",
        summary.queue_stats.peak_len,
        format_count(summary.queue_stats.producer_waits),
        format_count(summary.queue_stats.consumer_waits)
    );
    info!(
        "  Elapsed: {} ({})",
        format_duration(summary.elapsed),
        format_rate(input, summary.elapsed)
    );
}

/// Logs the start of an operation and, later, its completion with a count and rate.
///
/// ```
/// use rankdigest_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Ranking records");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs completion with the item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.elapsed();
        info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
