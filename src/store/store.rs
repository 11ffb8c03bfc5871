//! Window store
//!
//! Single owner of the current snapshot. Mutation goes through `&mut self`,
//! so the borrow checker provides the single-writer discipline; shared use
//! across tasks goes through [`super::handle::StoreHandle`].

use chrono::NaiveDateTime;
use serde::Serialize;

use super::action::WindowAction;
use super::reducer::{reduce, Rejection, Transition};
use super::snapshot::WindowSnapshot;
use crate::series::{
    format_timestamp, generate_points, midnight, SeriesError, SeriesResult, ValidRange,
    DEFAULT_STEP_MINUTES,
};

/// Settings a store is built from. Fixed for the store's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Bound for both window edges
    pub range: ValidRange,
    /// Sampling step of the generated series
    pub step_minutes: i64,
    /// Initial lower window edge
    pub initial_from: NaiveDateTime,
    /// Initial upper window edge
    pub initial_to: NaiveDateTime,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            range: ValidRange::default(),
            step_minutes: DEFAULT_STEP_MINUTES,
            initial_from: midnight(2010, 5, 3),
            initial_to: midnight(2010, 5, 5),
        }
    }
}

impl StoreConfig {
    /// Check the initial window against the range
    pub fn validate(&self) -> SeriesResult<()> {
        for edge in [self.initial_from, self.initial_to] {
            if !self.range.contains(edge) {
                return Err(SeriesError::WindowOutOfRange(edge));
            }
        }
        if self.step_minutes <= 0 {
            return Err(SeriesError::InvalidStep(self.step_minutes));
        }
        Ok(())
    }
}

/// Outcome of a dispatched command
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Accepted,
    Rejected {
        #[serde(flatten)]
        rejection: Rejection,
    },
}

impl DispatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DispatchOutcome::Accepted)
    }
}

/// Store counters
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreStats {
    /// Commands that produced a new snapshot
    pub accepted: u64,
    /// Commands rejected by the range check
    pub rejected: u64,
    /// Number of generated samples
    pub point_count: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accepted={}, rejected={}, points={}",
            self.accepted, self.rejected, self.point_count
        )
    }
}

/// Owner of the current window snapshot
#[derive(Debug)]
pub struct WindowStore {
    range: ValidRange,
    current: WindowSnapshot,
    stats: StoreStats,
}

impl WindowStore {
    /// Build a store: validate the config and generate the series once
    pub fn new(config: StoreConfig) -> SeriesResult<Self> {
        config.validate()?;

        let points = generate_points(config.range, config.step_minutes)?;
        tracing::info!(
            range_min = %format_timestamp(config.range.min),
            range_max = %format_timestamp(config.range.max),
            step_minutes = config.step_minutes,
            points = points.len(),
            "Generated series"
        );

        let stats = StoreStats {
            point_count: points.len(),
            ..Default::default()
        };

        Ok(Self {
            range: config.range,
            current: WindowSnapshot::new(config.initial_from, config.initial_to, points),
            stats,
        })
    }

    /// Apply a command. Out-of-range commands leave the state unchanged.
    pub fn dispatch(&mut self, action: WindowAction) -> DispatchOutcome {
        match reduce(&self.range, &self.current, &action) {
            Transition::Accepted(next) => {
                tracing::debug!(
                    action = action.name(),
                    date_from = %format_timestamp(next.date_from),
                    date_to = %format_timestamp(next.date_to),
                    "Window updated"
                );
                self.current = next;
                self.stats.accepted += 1;
                DispatchOutcome::Accepted
            }
            Transition::Rejected(rejection) => {
                tracing::warn!(action = action.name(), "Window command rejected: {}", rejection);
                self.stats.rejected += 1;
                DispatchOutcome::Rejected { rejection }
            }
        }
    }

    pub fn set_window_start(&mut self, time: NaiveDateTime) -> DispatchOutcome {
        self.dispatch(WindowAction::set_start(time))
    }

    pub fn set_window_end(&mut self, time: NaiveDateTime) -> DispatchOutcome {
        self.dispatch(WindowAction::set_end(time))
    }

    /// Current snapshot
    pub fn state(&self) -> &WindowSnapshot {
        &self.current
    }

    /// Owned copy of the current snapshot; shares the sample buffer
    pub fn snapshot(&self) -> WindowSnapshot {
        self.current.clone()
    }

    pub fn valid_range(&self) -> ValidRange {
        self.range
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn store() -> WindowStore {
        WindowStore::new(StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let store = store();
        let state = store.state();

        assert_eq!(state.date_from, midnight(2010, 5, 3));
        assert_eq!(state.date_to, midnight(2010, 5, 5));
        assert_eq!(state.points.len(), 7776);
        assert_eq!(store.stats().point_count, 7776);
    }

    #[test]
    fn test_rejected_start_keeps_window() {
        let mut store = store();

        let outcome = store.set_window_start(midnight(2010, 4, 30));
        assert!(!outcome.is_accepted());
        assert_eq!(store.state().date_from, midnight(2010, 5, 3));
        assert_eq!(store.stats().rejected, 1);
    }

    #[test]
    fn test_rejected_end_keeps_window() {
        let mut store = store();

        let outcome = store.set_window_end(midnight(2010, 6, 1));
        assert_eq!(
            outcome,
            DispatchOutcome::Rejected {
                rejection: Rejection::AfterRangeEnd {
                    candidate: midnight(2010, 6, 1),
                    max: midnight(2010, 5, 28),
                }
            }
        );
        assert_eq!(store.state().date_to, midnight(2010, 5, 5));
    }

    #[test]
    fn test_accepted_start_replaces_snapshot() {
        let mut store = store();
        let before = store.snapshot();

        let outcome = store.set_window_start(midnight(2010, 5, 10));
        assert!(outcome.is_accepted());

        let after = store.state();
        assert_eq!(after.date_from, midnight(2010, 5, 10));
        assert_eq!(after.date_to, before.date_to);
        assert_eq!(after.points, before.points);

        // The snapshot taken before dispatch is still intact
        assert_eq!(before.date_from, midnight(2010, 5, 3));
        assert_eq!(store.stats().accepted, 1);
    }

    #[test]
    fn test_inverted_window_is_kept() {
        let mut store = store();

        assert!(store.set_window_end(midnight(2010, 5, 2)).is_accepted());
        assert!(store.state().is_inverted());
        assert!(store.state().visible_points().is_empty());

        assert!(store.set_window_start(midnight(2010, 5, 1)).is_accepted());
        assert!(!store.state().is_inverted());
        assert_eq!(store.state().visible_points().len(), 24 * 12 + 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StoreConfig {
            initial_from: midnight(2010, 4, 1),
            ..Default::default()
        };
        assert_eq!(
            WindowStore::new(config).unwrap_err(),
            SeriesError::WindowOutOfRange(midnight(2010, 4, 1))
        );

        let config = StoreConfig {
            step_minutes: 0,
            ..Default::default()
        };
        assert!(WindowStore::new(config).is_err());
    }

    #[test]
    fn test_custom_step() {
        let min = midnight(2010, 5, 1);
        let config = StoreConfig {
            range: ValidRange::new(min, min + Duration::hours(1)).unwrap(),
            step_minutes: 15,
            initial_from: min,
            initial_to: min + Duration::minutes(30),
        };
        let store = WindowStore::new(config).unwrap();

        let values: Vec<f64> = store.state().points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 15.0, 30.0, 45.0]);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(DispatchOutcome::Accepted).unwrap();
        assert_eq!(json["status"], "accepted");

        let outcome = DispatchOutcome::Rejected {
            rejection: Rejection::BeforeRangeStart {
                candidate: midnight(2010, 4, 30),
                min: midnight(2010, 5, 1),
            },
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "before_range_start");
        assert_eq!(json["candidate"], "2010-04-30T00:00:00");
    }
}
