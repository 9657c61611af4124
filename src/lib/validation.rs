//! Input validation utilities
//!
//! Checks run by commands before any work starts, reported through [`crate::errors`].

use crate::errors::{Result, SrnaError};
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Manifest")
///
/// # Errors
/// Returns [`SrnaError::MissingFile`] if the path does not exist or is a directory
///
/// # Example
/// ```
/// use srnatools_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/samples.list", "Manifest");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let reason = if !path_ref.exists() {
        "File does not exist"
    } else if path_ref.is_dir() {
        "Path is a directory"
    } else {
        return Ok(());
    };
    Err(SrnaError::MissingFile {
        file_type: description.to_string(),
        path: path_ref.display().to_string(),
        reason: reason.to_string(),
    })
}
