use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{handlers::success, ApiResult, AppState};

pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let rooms = state.store.list_rooms()?;
    Ok(success(rooms))
}

/// `identifier` is a room number or a room id; the number wins when both
/// would match.
pub async fn room_details(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Json<Value>> {
    let details = state.store.room_details(&identifier)?;
    Ok(success(details))
}
