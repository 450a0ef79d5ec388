//! Custom error types for rankdigest operations.

use thiserror::Error;

/// Result type alias for rankdigest operations
pub type Result<T> = std::result::Result<T, RankError>;

/// Error type for rankdigest operations
#[derive(Error, Debug)]
pub enum RankError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Input or output file problem
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "input JSON")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A worker thread panicked before observing end of input
    #[error("Worker {worker} panicked while digesting records")]
    WorkerPanicked {
        /// Zero-based index of the worker
        worker: usize,
    },

    /// The collector thread panicked before producing a snapshot
    #[error("Result collector thread panicked")]
    CollectorPanicked,
}
