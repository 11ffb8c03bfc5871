//! # Series Window
//!
//! A date-windowed time-series store: a deterministic series generated once
//! over a fixed valid range, plus a `[date_from, date_to]` window selection
//! moved by two commands.
//!
//! ## Features
//!
//! - **Deterministic series**: 5-minute samples with clock-derived values
//! - **Pure reducer**: every command yields a new snapshot or a rejection
//! - **Silent rejection**: out-of-range edges leave the state unchanged
//! - **Actor handle**: single-writer store task for concurrent callers
//! - **REST API**: dispatch and read the window over HTTP
//!
//! ## Modules
//!
//! - [`series`]: Points, valid range, series generation
//! - [`store`]: Commands, snapshots, reducer, store and actor handle
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use series_window::series::day_start;
//! use series_window::store::{StoreConfig, WindowAction, WindowStore};
//!
//! let mut store = WindowStore::new(StoreConfig::default()).unwrap();
//! assert_eq!(store.state().points.len(), 7776);
//!
//! store.dispatch(WindowAction::set_end(day_start(2010, 6, 1).unwrap()));
//! assert_eq!(store.state().date_to, day_start(2010, 5, 5).unwrap());
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod series;
pub mod store;

// Re-export top-level types for convenience
pub use series::{
    generate_points, parse_timestamp, SeriesError, SeriesResult, TimeSeriesPoint, ValidRange,
};

pub use store::{
    DispatchOutcome, Rejection, StoreConfig, StoreError, StoreHandle, StoreResult, StoreStats,
    Transition, WindowAction, WindowSnapshot, WindowStore,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
