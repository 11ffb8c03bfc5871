//! Window reducer
//!
//! Pure transition function: `(snapshot, action) -> Transition`. The start
//! edge is only checked against the range floor and the end edge only
//! against the range ceiling. The two edges are not checked against each
//! other, so an inverted window is representable.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::action::WindowAction;
use super::snapshot::WindowSnapshot;
use crate::series::{format_timestamp, RangePosition, ValidRange};

/// Why a command left the state unchanged
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Candidate lies strictly before the valid range
    BeforeRangeStart {
        candidate: NaiveDateTime,
        min: NaiveDateTime,
    },
    /// Candidate lies strictly after the valid range
    AfterRangeEnd {
        candidate: NaiveDateTime,
        max: NaiveDateTime,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::BeforeRangeStart { candidate, min } => write!(
                f,
                "{} is before the start of the valid range ({})",
                format_timestamp(*candidate),
                format_timestamp(*min)
            ),
            Rejection::AfterRangeEnd { candidate, max } => write!(
                f,
                "{} is after the end of the valid range ({})",
                format_timestamp(*candidate),
                format_timestamp(*max)
            ),
        }
    }
}

/// Result of reducing one action
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Command accepted, carrying the new snapshot
    Accepted(WindowSnapshot),
    /// Command rejected, previous snapshot stays current
    Rejected(Rejection),
}

impl Transition {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Transition::Accepted(_))
    }
}

/// Check a command's candidate: a start before `min` or an end after `max`
/// is rejected, anything else passes.
pub fn check_action(range: &ValidRange, action: &WindowAction) -> Result<(), Rejection> {
    match (action, range.position(action.candidate())) {
        (WindowAction::SetWindowStart { time }, RangePosition::Before) => {
            Err(Rejection::BeforeRangeStart {
                candidate: *time,
                min: range.min,
            })
        }
        (WindowAction::SetWindowEnd { time }, RangePosition::After) => {
            Err(Rejection::AfterRangeEnd {
                candidate: *time,
                max: range.max,
            })
        }
        _ => Ok(()),
    }
}

/// Reduce one action against a snapshot. `state` is only borrowed.
pub fn reduce(range: &ValidRange, state: &WindowSnapshot, action: &WindowAction) -> Transition {
    if let Err(rejection) = check_action(range, action) {
        return Transition::Rejected(rejection);
    }

    let next = match action {
        WindowAction::SetWindowStart { time } => state.with_date_from(*time),
        WindowAction::SetWindowEnd { time } => state.with_date_to(*time),
    };
    Transition::Accepted(next)
}

/// Reducer in state-to-state form: a rejected command yields an equal copy
/// of `state`.
pub fn apply(range: &ValidRange, state: &WindowSnapshot, action: &WindowAction) -> WindowSnapshot {
    match reduce(range, state, action) {
        Transition::Accepted(next) => next,
        Transition::Rejected(_) => state.clone(),
    }
}
