use axum::{
    extract::{Path, State},
    Json,
};
use hostel_store::NewRoomChange;
use serde_json::Value;

use crate::{
    handlers::{success, success_message},
    ApiError, ApiResult, AppState,
};

pub async fn list_room_changes(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let requests = state.store.list_pending_room_changes()?;
    Ok(success(requests))
}

pub async fn create_room_change(
    State(state): State<AppState>,
    Json(request): Json<NewRoomChange>,
) -> ApiResult<Json<Value>> {
    if request.reason.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.store.create_room_change(&request)?;
    Ok(success_message("Room change request submitted successfully"))
}

pub async fn approve_room_change(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.store.approve_room_change(request_id)?;
    Ok(success_message("Room change request approved successfully"))
}

pub async fn deny_room_change(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.store.deny_room_change(request_id)?;
    Ok(success_message("Room change request denied"))
}
