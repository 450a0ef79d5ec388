//! Input validation utilities
//!
//! Checks on command-line parameters and file paths, run before any work starts. Every
//! function returns a structured [`RankError`] naming the offending parameter or file.

use crate::errors::{RankError, Result};
use std::fmt::Display;
use std::path::Path;

/// Validate that a file exists
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use rankdigest_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/students.json", "Input file");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(RankError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that the directory an output file will be written to exists
///
/// # Errors
/// Returns an error if the parent directory is missing
pub fn validate_output_dir<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    match path_ref.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(RankError::InvalidFileFormat {
                file_type: description.to_string(),
                path: path_ref.display().to_string(),
                reason: format!("Directory does not exist: {}", parent.display()),
            })
        }
        _ => Ok(()),
    }
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use rankdigest_lib::validation::validate_positive;
///
/// validate_positive(4, "threads").unwrap();
///
/// let result = validate_positive(0, "threads");
/// assert!(result.is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(RankError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}

/// Validate an optional value that, when given, must be positive
///
/// # Errors
/// Returns an error if the value is present and not positive
pub fn validate_optional_positive<T: Ord + Display + Default>(
    value: Option<T>,
    name: &str,
) -> Result<()> {
    value.map_or(Ok(()), |v| validate_positive(v, name))
}

/// Validate that a floating-point value is finite (not NaN or infinite)
///
/// # Errors
/// Returns an error if the value is NaN or infinite
///
/// # Example
/// ```
/// use rankdigest_lib::validation::validate_finite;
///
/// validate_finite(7.0, "min-score").unwrap();
/// assert!(validate_finite(f64::NAN, "min-score").is_err());
/// ```
pub fn validate_finite(value: f64, name: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(RankError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be a finite number, got: {value}"),
        });
    }
    Ok(())
}
