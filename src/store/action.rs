//! Window commands
//!
//! One variant per command. The wire form is internally tagged:
//!
//! ```json
//! { "type": "set_window_start", "time": "2010-05-10 00:00" }
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::series::deserialize_timestamp;

/// Commands accepted by the window store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowAction {
    /// Move the inclusive lower edge of the window
    SetWindowStart {
        #[serde(deserialize_with = "deserialize_timestamp")]
        time: NaiveDateTime,
    },
    /// Move the inclusive upper edge of the window
    SetWindowEnd {
        #[serde(deserialize_with = "deserialize_timestamp")]
        time: NaiveDateTime,
    },
}

impl WindowAction {
    pub fn set_start(time: NaiveDateTime) -> Self {
        WindowAction::SetWindowStart { time }
    }

    pub fn set_end(time: NaiveDateTime) -> Self {
        WindowAction::SetWindowEnd { time }
    }

    /// Candidate timestamp carried by the command
    pub fn candidate(&self) -> NaiveDateTime {
        match self {
            WindowAction::SetWindowStart { time } | WindowAction::SetWindowEnd { time } => *time,
        }
    }

    /// Short name used in logs and API responses
    pub fn name(&self) -> &'static str {
        match self {
            WindowAction::SetWindowStart { .. } => "set_window_start",
            WindowAction::SetWindowEnd { .. } => "set_window_end",
        }
    }
}
