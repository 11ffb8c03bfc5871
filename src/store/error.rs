//! Store error types

use thiserror::Error;

use crate::series::SeriesError;

/// Errors raised by the store and its actor handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store could not be built from its configuration
    #[error("Store setup failed: {0}")]
    Setup(#[from] SeriesError),

    /// The store task has stopped and no longer accepts commands
    #[error("Store task is no longer running")]
    Closed,
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
