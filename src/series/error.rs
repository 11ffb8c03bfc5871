//! Series error types
//!
//! Errors raised while building a series or a store from configuration.
//! Window commands never produce these: out-of-range commands are rejected
//! silently by the store.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while setting up a series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Valid range is empty or reversed
    #[error("Invalid valid range: min {min} must be before max {max}")]
    InvalidRange {
        min: NaiveDateTime,
        max: NaiveDateTime,
    },

    /// Sampling step must be a positive number of minutes
    #[error("Invalid step: {0} minutes (must be positive)")]
    InvalidStep(i64),

    /// Initial window edge lies outside the valid range
    #[error("Initial window edge {0} lies outside the valid range")]
    WindowOutOfRange(NaiveDateTime),

    /// Timestamp text could not be parsed
    #[error("Invalid timestamp '{0}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidTimestamp(String),
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;
