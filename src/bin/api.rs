//! Series Window API Server
//!
//! Run with: cargo run --bin series-window-api
//!
//! # Configuration
//!
//! Loaded from `./config.toml`, `/etc/series-window/config.toml` or the user
//! config directory, then overridden by environment variables:
//! - `SERIES_WINDOW_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SERIES_WINDOW_API_PORT`: Port to listen on (default: 8086)
//! - `SERIES_WINDOW_RANGE_MIN` / `SERIES_WINDOW_RANGE_MAX`: Valid range
//! - `SERIES_WINDOW_STEP_MINUTES`: Sampling step (default: 5)
//! - `RUST_LOG`: Log filter (overrides the configured level)

use series_window::api::{serve, AppState};
use series_window::config::Config;
use series_window::store::{StoreHandle, WindowStore, DEFAULT_QUEUE_CAPACITY};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    series_window::logging::init(&config.logging);

    tracing::info!("Starting series window API v{}", env!("CARGO_PKG_VERSION"));

    let store = WindowStore::new(config.store_config()?)?;
    let (handle, store_task) = StoreHandle::spawn(store, DEFAULT_QUEUE_CAPACITY);

    serve(AppState::new(handle), &config.api).await?;

    // Router dropped its handle; the store task drains and exits
    store_task.await?;
    tracing::info!("Series window API stopped");

    Ok(())
}
