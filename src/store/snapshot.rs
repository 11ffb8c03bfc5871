//! Window snapshot
//!
//! One immutable value of `{date_from, date_to, points}`. The series is held
//! behind an `Arc<[TimeSeriesPoint]>`: a snapshot derived from another shares
//! the same sample buffer, and since no `&mut` path into it exists, earlier
//! snapshots can never observe a change.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

use crate::series::TimeSeriesPoint;

/// Store state at one point in time
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WindowSnapshot {
    /// Inclusive lower edge of the visible window
    pub date_from: NaiveDateTime,
    /// Inclusive upper edge of the visible window
    pub date_to: NaiveDateTime,
    /// Full generated series, time-ascending
    pub points: Arc<[TimeSeriesPoint]>,
}

impl WindowSnapshot {
    /// Create the initial snapshot
    pub fn new(
        date_from: NaiveDateTime,
        date_to: NaiveDateTime,
        points: impl Into<Arc<[TimeSeriesPoint]>>,
    ) -> Self {
        Self {
            date_from,
            date_to,
            points: points.into(),
        }
    }

    /// Derive a snapshot with a new lower edge
    pub fn with_date_from(&self, date_from: NaiveDateTime) -> Self {
        Self {
            date_from,
            date_to: self.date_to,
            points: Arc::clone(&self.points),
        }
    }

    /// Derive a snapshot with a new upper edge
    pub fn with_date_to(&self, date_to: NaiveDateTime) -> Self {
        Self {
            date_from: self.date_from,
            date_to,
            points: Arc::clone(&self.points),
        }
    }

    /// True when `date_from` lies after `date_to`
    pub fn is_inverted(&self) -> bool {
        self.date_from > self.date_to
    }

    /// Points inside `[date_from, date_to]`; empty for an inverted window
    pub fn visible_points(&self) -> &[TimeSeriesPoint] {
        if self.is_inverted() {
            return &[];
        }

        // Series is sorted by time, so both edges are partition points
        let start = self.points.partition_point(|p| p.time < self.date_from);
        let end = self.points.partition_point(|p| p.time <= self.date_to);
        &self.points[start..end]
    }

    /// Check whether two snapshots share the same sample buffer
    pub fn shares_points_with(&self, other: &WindowSnapshot) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}
