//! Window Routes
//!
//! - GET /api/v1/window - Current window
//! - GET /api/v1/window/points - Samples (all, or `?visible=true`)
//! - POST /api/v1/window/start - Move the lower edge
//! - POST /api/v1/window/end - Move the upper edge
//! - POST /api/v1/dispatch - Dispatch a tagged `WindowAction`

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    DispatchResponse, EdgeRequest, PointsQuery, PointsResponse, WindowResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::series::parse_timestamp;
use crate::store::WindowAction;

/// GET /api/v1/window
pub async fn get_window(State(state): State<Arc<AppState>>) -> Json<WindowResponse> {
    let snapshot = state.store.state();
    Json(WindowResponse::new(&snapshot, state.store.valid_range()))
}

/// GET /api/v1/window/points
pub async fn get_points(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PointsQuery>,
) -> Json<PointsResponse> {
    let snapshot = state.store.state();
    let points = if query.visible {
        snapshot.visible_points()
    } else {
        &snapshot.points[..]
    };
    Json(PointsResponse::new(points))
}

/// POST /api/v1/window/start
pub async fn set_start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EdgeRequest>,
) -> ApiResult<Json<DispatchResponse>> {
    let time = parse_timestamp(&req.time)?;
    dispatch_action(&state, WindowAction::set_start(time)).await
}

/// POST /api/v1/window/end
pub async fn set_end(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EdgeRequest>,
) -> ApiResult<Json<DispatchResponse>> {
    let time = parse_timestamp(&req.time)?;
    dispatch_action(&state, WindowAction::set_end(time)).await
}

/// POST /api/v1/dispatch
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Json(action): Json<WindowAction>,
) -> ApiResult<Json<DispatchResponse>> {
    dispatch_action(&state, action).await
}

async fn dispatch_action(
    state: &AppState,
    action: WindowAction,
) -> ApiResult<Json<DispatchResponse>> {
    let dispatched = state.store.dispatch(action).await?;

    Ok(Json(DispatchResponse {
        action: action.name().to_string(),
        outcome: dispatched.outcome,
        window: WindowResponse::new(&dispatched.snapshot, state.store.valid_range()),
    }))
}
