//! CLI command implementations for rankdigest.
//!
//! - [`run`] - Digest, filter and rank a batch of records
//! - [`simulate`] - Generate a synthetic input file

#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod run;
pub mod simulate;
