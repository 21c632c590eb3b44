//! Field validators shared by the stores.
//!
//! The `is_*` predicates are what the stores gate on. The `check_*` variants
//! wrap them into [`RecordResult`] so callers can trace why a value was
//! refused.

use crate::error::{RecordError, RecordResult};

pub fn is_valid_id(id: i32) -> bool {
    id >= 0
}

/// Non-empty and not only whitespace.
pub fn is_non_blank(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

/// Non-empty; whitespace-only text passes.
pub fn is_non_empty(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty())
}

pub fn is_non_negative_int(value: i32) -> bool {
    value >= 0
}

/// `NaN` is never valid.
pub fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Inclusive range check; `NaN` is never in range.
pub fn is_in_range(value: f64, lo: f64, hi: f64) -> bool {
    value >= lo && value <= hi
}

pub fn check_id(id: i32) -> RecordResult<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(RecordError::validation(format!("id must be >= 0 (got {id})")))
    }
}

pub fn check(ok: bool, field: &str) -> RecordResult<()> {
    if ok {
        Ok(())
    } else {
        Err(RecordError::validation(format!("invalid {field}")))
    }
}
