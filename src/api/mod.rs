//! Series Window REST API
//!
//! HTTP layer over the store actor, built with Axum.
//!
//! # Endpoints
//!
//! ## Window
//! - `GET /api/v1/window` - Current window and valid range
//! - `GET /api/v1/window/points` - Generated samples (`?visible=true` for the window only)
//! - `POST /api/v1/window/start` - Move the lower edge `{"time": "2010-05-10 00:00"}`
//! - `POST /api/v1/window/end` - Move the upper edge
//! - `POST /api/v1/dispatch` - Dispatch a tagged command
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use series_window::api::{serve, AppState};
//! use series_window::config::ApiConfig;
//! use series_window::store::{StoreConfig, StoreHandle, WindowStore, DEFAULT_QUEUE_CAPACITY};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = WindowStore::new(StoreConfig::default())?;
//!     let (handle, _task) = StoreHandle::spawn(store, DEFAULT_QUEUE_CAPACITY);
//!
//!     serve(AppState::new(handle), &ApiConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/window", get(routes::window::get_window))
        .route("/window/points", get(routes::window::get_points))
        .route("/window/start", post(routes::window::set_start))
        .route("/window/end", post(routes::window::set_end))
        .route("/dispatch", post(routes::window::dispatch));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Series window API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Series window API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreConfig, StoreHandle, WindowStore, DEFAULT_QUEUE_CAPACITY};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = WindowStore::new(StoreConfig::default()).unwrap();
        let (handle, _task) = StoreHandle::spawn(store, DEFAULT_QUEUE_CAPACITY);
        build_router(AppState::new(handle))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_get_window() {
        let app = create_test_app();

        let response = app.oneshot(get("/api/v1/window")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["date_from"], "2010-05-03 00:00");
        assert_eq!(json["date_to"], "2010-05-05 00:00");
        assert_eq!(json["range"]["min"], "2010-05-01 00:00");
        assert_eq!(json["range"]["max"], "2010-05-28 00:00");
        assert_eq!(json["point_count"], 7776);
        assert_eq!(json["visible_count"], 577);
        assert_eq!(json["inverted"], false);
    }

    #[tokio::test]
    async fn test_get_points() {
        let app = create_test_app();

        let response = app.clone().oneshot(get("/api/v1/window/points")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["count"], 7776);
        assert_eq!(json["points"][1]["time"], "2010-05-01 00:05");
        assert_eq!(json["points"][1]["value"], 5.0);

        let response = app
            .oneshot(get("/api/v1/window/points?visible=true"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["count"], 577);
        assert_eq!(json["points"][0]["time"], "2010-05-03 00:00");
    }

    #[tokio::test]
    async fn test_set_start_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/window/start", r#"{"time": "2010-04-30"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["action"], "set_window_start");
        assert_eq!(json["outcome"]["status"], "rejected");
        assert_eq!(json["outcome"]["reason"], "before_range_start");
        assert_eq!(json["window"]["date_from"], "2010-05-03 00:00");
    }

    #[tokio::test]
    async fn test_set_end_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/window/end", r#"{"time": "2010-06-01"}"#))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["outcome"]["status"], "rejected");
        assert_eq!(json["outcome"]["reason"], "after_range_end");
        assert_eq!(json["window"]["date_to"], "2010-05-05 00:00");
    }

    #[tokio::test]
    async fn test_set_start_accepted() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/window/start", r#"{"time": "2010-05-10"}"#))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["outcome"]["status"], "accepted");
        assert_eq!(json["window"]["date_from"], "2010-05-10 00:00");
        assert_eq!(json["window"]["date_to"], "2010-05-05 00:00");
        assert_eq!(json["window"]["inverted"], true);
        assert_eq!(json["window"]["visible_count"], 0);

        let response = app.oneshot(get("/api/v1/window")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["date_from"], "2010-05-10 00:00");
    }

    #[tokio::test]
    async fn test_dispatch_tagged_action() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/api/v1/dispatch",
                r#"{"type": "set_window_end", "time": "2010-05-20 12:30"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["action"], "set_window_end");
        assert_eq!(json["outcome"]["status"], "accepted");
        assert_eq!(json["window"]["date_to"], "2010-05-20 12:30");
    }

    #[tokio::test]
    async fn test_invalid_timestamp() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/window/start", r#"{"time": "someday"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/dispatch", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/api/v1/dispatch", r#"{"type": "reset"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
