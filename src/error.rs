//! Error types for lanecast operations.
//!
//! Unsupported cast combinations are compile errors, never runtime errors;
//! the only runtime-checkable misuse is handing the slice-conversion helpers
//! an output buffer of the wrong length. This module defines the error type
//! for that case so applications can handle it gracefully instead of
//! panicking.

use std::fmt;

/// Errors that can occur during lanecast slice operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Source and destination slices have different lengths.
    LengthMismatch {
        /// Number of elements in the source slice.
        source_len: usize,
        /// Number of elements in the destination slice.
        destination_len: usize,
    },
    /// Memory allocation for the output vector failed.
    AllocationError {
        /// The size that was requested to be allocated.
        requested_size: usize,
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastError::LengthMismatch {
                source_len,
                destination_len,
            } => write!(
                f,
                "Length mismatch: source has {} elements, destination has {}",
                source_len, destination_len
            ),
            CastError::AllocationError {
                requested_size,
                message,
            } => write!(
                f,
                "Memory allocation failed: {} (requested {} bytes)",
                message, requested_size
            ),
        }
    }
}

impl std::error::Error for CastError {}

/// Result type alias for lanecast operations.
pub type Result<T> = std::result::Result<T, CastError>;

/// Creates a length-mismatch error.
pub fn length_mismatch(source_len: usize, destination_len: usize) -> CastError {
    CastError::LengthMismatch {
        source_len,
        destination_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(16, 8);
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("16"));
        assert!(display.contains("8"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = length_mismatch(4, 2);
        let error2 = length_mismatch(4, 2);
        assert_eq!(error1, error2);
    }
}
