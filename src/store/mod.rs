//! Window Store
//!
//! - **action**: `WindowAction` command enum
//! - **snapshot**: `WindowSnapshot` state value
//! - **reducer**: pure transition function
//! - **store**: `WindowStore`, the single owner of the current snapshot
//! - **handle**: actor wrapper for concurrent callers
//!
//! # Example
//!
//! ```rust
//! use series_window::series::day_start;
//! use series_window::store::{StoreConfig, WindowAction, WindowStore};
//!
//! let mut store = WindowStore::new(StoreConfig::default()).unwrap();
//!
//! // Before the valid range: silently rejected
//! let outcome = store.dispatch(WindowAction::set_start(day_start(2010, 4, 30).unwrap()));
//! assert!(!outcome.is_accepted());
//! assert_eq!(store.state().date_from, day_start(2010, 5, 3).unwrap());
//!
//! // Inside the valid range: accepted
//! store.dispatch(WindowAction::set_start(day_start(2010, 5, 10).unwrap()));
//! assert_eq!(store.state().date_from, day_start(2010, 5, 10).unwrap());
//! ```

pub mod action;
pub mod error;
pub mod handle;
pub mod reducer;
pub mod snapshot;
#[allow(clippy::module_inception)]
pub mod store;

pub use action::WindowAction;
pub use error::{StoreError, StoreResult};
pub use handle::{Dispatched, StoreHandle, DEFAULT_QUEUE_CAPACITY};
pub use reducer::{apply, check_action, reduce, Rejection, Transition};
pub use snapshot::WindowSnapshot;
pub use store::{DispatchOutcome, StoreConfig, StoreStats, WindowStore};
