//! Integration tests for rankdigest.
//!
//! These tests drive the built binary and the library pipeline end to end.

mod helpers;
mod test_error_paths;
mod test_pipeline_concurrency;
mod test_run_command;
mod test_simulate_command;
