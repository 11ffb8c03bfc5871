//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Timestamps travel as `"YYYY-MM-DD HH:MM"` strings.

use serde::{Deserialize, Serialize};

use crate::series::{format_timestamp, TimeSeriesPoint, ValidRange};
use crate::store::{DispatchOutcome, WindowSnapshot};

// ============================================
// WINDOW DTOs
// ============================================

/// Valid range bounds
#[derive(Debug, Serialize)]
pub struct RangeDto {
    pub min: String,
    pub max: String,
}

impl From<ValidRange> for RangeDto {
    fn from(range: ValidRange) -> Self {
        Self {
            min: format_timestamp(range.min),
            max: format_timestamp(range.max),
        }
    }
}

/// Current window state, without the samples
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    /// Inclusive lower edge
    pub date_from: String,
    /// Inclusive upper edge
    pub date_to: String,
    /// True when date_from is after date_to
    pub inverted: bool,
    /// Bounds accepted for either edge
    pub range: RangeDto,
    /// Samples in the full series
    pub point_count: usize,
    /// Samples inside the window
    pub visible_count: usize,
}

impl WindowResponse {
    pub fn new(snapshot: &WindowSnapshot, range: ValidRange) -> Self {
        Self {
            date_from: format_timestamp(snapshot.date_from),
            date_to: format_timestamp(snapshot.date_to),
            inverted: snapshot.is_inverted(),
            range: range.into(),
            point_count: snapshot.points.len(),
            visible_count: snapshot.visible_points().len(),
        }
    }
}

/// Query parameters for the points endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PointsQuery {
    /// Only return samples inside the window
    #[serde(default)]
    pub visible: bool,
}

/// Single sample
#[derive(Debug, Serialize)]
pub struct PointDto {
    pub time: String,
    pub value: f64,
}

impl From<&TimeSeriesPoint> for PointDto {
    fn from(point: &TimeSeriesPoint) -> Self {
        Self {
            time: format_timestamp(point.time),
            value: point.value,
        }
    }
}

/// Samples response
#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub count: usize,
    pub points: Vec<PointDto>,
}

impl PointsResponse {
    pub fn new(points: &[TimeSeriesPoint]) -> Self {
        Self {
            count: points.len(),
            points: points.iter().map(PointDto::from).collect(),
        }
    }
}

// ============================================
// COMMAND DTOs
// ============================================

/// Request body for moving a single edge
#[derive(Debug, Deserialize)]
pub struct EdgeRequest {
    /// Candidate timestamp
    pub time: String,
}

/// Result of a dispatched command
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// Command name
    pub action: String,
    /// Accepted or rejected with reason
    pub outcome: DispatchOutcome,
    /// Window after the command
    pub window: WindowResponse,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Store task status
    pub store: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
