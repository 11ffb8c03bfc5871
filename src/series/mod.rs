//! Series Window Data Layer
//!
//! - **types**: `TimeSeriesPoint`, `ValidRange`, timestamp parsing
//! - **generator**: deterministic sampler that fills the valid range
//! - **error**: setup errors
//!
//! The series is generated once and never filtered; the window selection
//! lives in [`crate::store`].

pub mod error;
pub mod generator;
pub mod types;

pub use error::{SeriesError, SeriesResult};
pub use generator::{generate_points, sample_value, SeriesGenerator};
pub use types::{
    day_start, deserialize_timestamp, format_timestamp, parse_timestamp, truncate_to_minute,
    RangePosition, TimeSeriesPoint, ValidRange, DEFAULT_STEP_MINUTES,
};

pub(crate) use types::midnight;
