//! Paging engine error types.

use thiserror::Error;

/// Errors that can occur in the paging engine.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid frame count: {0} (must be at least 1)")]
    InvalidFrameCount(usize),

    #[error("Process id must not be empty")]
    EmptyProcessId,

    #[error("Replacement failed: table is full but policy {policy} named no usable victim")]
    ReplacementFailed { policy: &'static str },
}

/// Result type for paging operations.
pub type MemoryResult<T> = Result<T, MemoryError>;
