//! Record error model.

use thiserror::Error;

/// Result type used across the record layer.
pub type RecordResult<T> = Result<T, RecordError>;

/// Record-level error.
///
/// Stores never let these escape their CRUD methods (those return `bool`);
/// the error carries the reason so it can be traced before it is dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A field value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record with the given id exists in the store.
    #[error("record {0} not found")]
    NotFound(i32),
}

impl RecordError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(id: i32) -> Self {
        Self::NotFound(id)
    }
}

