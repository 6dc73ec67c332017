use axum::extract::{Path, State};
use axum::Json;
use seatlock_types::api::{
    AcquireLockRequest, ExtendLockRequest, LockResponse, ReleaseLockRequest,
};
use seatlock_types::ids::SeatId;
use serde_json::{json, Value};

use crate::response::lock_error_response;
use crate::state::AppState;

pub async fn acquire(
    State(state): State<AppState>,
    Path(seat_id): Path<SeatId>,
    Json(payload): Json<AcquireLockRequest>,
) -> (axum::http::StatusCode, Json<LockResponse>) {
    match state
        .registry
        .acquire(seat_id, payload.event_id, payload.user_id)
        .await
    {
        Ok(lock) => (axum::http::StatusCode::OK, Json(LockResponse::ok(lock.lock_id, lock.expires_at))),
        Err(err) => lock_error_response(err),
    }
}

pub async fn extend(
    State(state): State<AppState>,
    Path(seat_id): Path<SeatId>,
    Json(payload): Json<ExtendLockRequest>,
) -> (axum::http::StatusCode, Json<LockResponse>) {
    // event_id is not part of the extend predicate; the registry's trait
    // keeps the parameter for symmetry with `acquire` but the Lua script
    // ignores it.
    let placeholder_event_id = uuid::Uuid::nil();
    match state
        .registry
        .extend(seat_id, placeholder_event_id, payload.user_id, payload.lock_id)
        .await
    {
        Ok(extended) => (
            axum::http::StatusCode::OK,
            Json(LockResponse::ok(payload.lock_id, extended.new_expires_at)),
        ),
        Err(err) => lock_error_response(err),
    }
}

pub async fn release(
    State(state): State<AppState>,
    Path(seat_id): Path<SeatId>,
    Json(payload): Json<ReleaseLockRequest>,
) -> (axum::http::StatusCode, Json<Value>) {
    match state
        .registry
        .release(seat_id, payload.user_id, payload.lock_id)
        .await
    {
        Ok(()) => (axum::http::StatusCode::OK, Json(json!({ "success": true }))),
        Err(_) => (axum::http::StatusCode::OK, Json(json!({ "success": false }))),
    }
}
