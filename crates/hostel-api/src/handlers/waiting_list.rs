use axum::{
    extract::{Path, State},
    Json,
};
use hostel_store::NewWaitingEntry;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    handlers::{success, success_message},
    ApiError, ApiResult, AppState,
};

/// The admin UI sends the room as either a bare number or a string, so the
/// field accepts both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    Id(i64),
    Number(String),
}

impl RoomRef {
    fn identifier(&self) -> String {
        match self {
            RoomRef::Id(id) => id.to_string(),
            RoomRef::Number(number) => number.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub room_id: Option<RoomRef>,
}

pub async fn list_waiting(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let waiting = state.store.list_waiting()?;
    Ok(success(waiting))
}

pub async fn join_waiting_list(
    State(state): State<AppState>,
    Json(request): Json<NewWaitingEntry>,
) -> ApiResult<Json<Value>> {
    if request.student_name.is_empty() || request.phone.is_empty() || request.join_date.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.store.join_waiting_list(&request)?;
    Ok(success_message("Added to waiting list successfully"))
}

pub async fn assign_waiting(
    State(state): State<AppState>,
    Path(waiting_id): Path<i64>,
    Json(request): Json<AssignRequest>,
) -> ApiResult<Json<Value>> {
    let room = request
        .room_id
        .ok_or_else(|| ApiError::Validation("Room Number/ID is required".to_string()))?;
    let student_id = state.store.assign_waiting(waiting_id, &room.identifier())?;
    Ok(Json(json!({
        "success": true,
        "message": "Student assigned successfully",
        "student_id": student_id,
    })))
}
