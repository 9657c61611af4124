//! Custom error types for srnatools operations.

use thiserror::Error;

/// Result type alias for srnatools operations
pub type Result<T> = std::result::Result<T, SrnaError>;

/// Error type for srnatools operations
#[derive(Error, Debug)]
pub enum SrnaError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// An input file does not exist or could not be opened
    #[error("{file_type} file '{path}' could not be opened: {reason}")]
    MissingFile {
        /// Type of file (e.g., "Manifest", "Count XML")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A manifest line or feature/endpoint entry could not be parsed
    #[error("Malformed {file_type} record in '{path}': {reason}")]
    MalformedRecord {
        /// Type of file (e.g., "Manifest", "Count XML")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}

impl SrnaError {
    /// Builds a [`SrnaError::MalformedRecord`] from anything displayable.
    pub(crate) fn malformed(file_type: &str, path: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedRecord {
            file_type: file_type.to_string(),
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
