//! Error types for patient record loading.
//!
//! Loading is the only fallible operation in this crate. Once a
//! `PatientSummary` has been constructed it is immutable and every read
//! on it is infallible.

use thiserror::Error;

/// Errors produced while loading a patient record document.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record file could not be read from disk.
    #[error("failed to read record file: {reason}")]
    ReadFailed { reason: String },

    /// The record document is not valid JSON matching the record shape.
    #[error("failed to parse patient record: {reason}")]
    ParseFailed { reason: String },
}

/// Convenience alias used throughout the medichat crates.
pub type RecordResult<T> = Result<T, RecordError>;
