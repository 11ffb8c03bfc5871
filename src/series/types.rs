//! Core data types for the windowed series
//!
//! - `TimeSeriesPoint`: one generated sample
//! - `ValidRange`: the fixed bound every window edge must respect
//! - timestamp parsing shared by the config, CLI and API layers

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::error::{SeriesError, SeriesResult};

/// Default sampling step in minutes
pub const DEFAULT_STEP_MINUTES: i64 = 5;

/// Formats accepted for timestamps with a time-of-day component
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// A single time-series sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    /// Sample time (minute granularity)
    pub time: NaiveDateTime,
    /// Sample value, unconstrained
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: NaiveDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// Where a timestamp sits relative to a `ValidRange`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    Before,
    Within,
    After,
}

/// Closed interval `[min, max]` bounding both window edges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidRange {
    /// Earliest permitted window edge (inclusive)
    pub min: NaiveDateTime,
    /// Latest permitted window edge (inclusive)
    pub max: NaiveDateTime,
}

impl ValidRange {
    /// Create a valid range, rejecting empty or reversed bounds
    pub fn new(min: NaiveDateTime, max: NaiveDateTime) -> SeriesResult<Self> {
        if min >= max {
            return Err(SeriesError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Classify a timestamp against the bounds
    pub fn position(&self, time: NaiveDateTime) -> RangePosition {
        if time < self.min {
            RangePosition::Before
        } else if time > self.max {
            RangePosition::After
        } else {
            RangePosition::Within
        }
    }

    /// Check if a timestamp falls within the bounds (both ends inclusive)
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.position(time) == RangePosition::Within
    }

    /// Get the span of the range
    pub fn duration(&self) -> Duration {
        self.max - self.min
    }
}

impl Default for ValidRange {
    /// 2010-05-01 00:00 .. 2010-05-28 00:00
    fn default() -> Self {
        Self {
            min: midnight(2010, 5, 1),
            max: midnight(2010, 5, 28),
        }
    }
}

/// Midnight of a calendar day, or None if the date does not exist
pub fn day_start(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Midnight of a known-valid calendar day. Only called with literal dates.
pub(crate) fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    day_start(year, month, day).unwrap_or_default()
}

/// Drop seconds and sub-seconds: the series works at minute granularity
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Parse a timestamp given as `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or the `T`
/// separated variants. Seconds are accepted and truncated to the minute.
pub fn parse_timestamp(input: &str) -> SeriesResult<NaiveDateTime> {
    let trimmed = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(truncate_to_minute(ts));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SeriesError::InvalidTimestamp(input.to_string()))
}

/// Serde helper accepting every format `parse_timestamp` understands
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Render a timestamp the way `parse_timestamp` reads it back
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
