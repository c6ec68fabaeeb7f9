use axum::{extract::State, Json};
use hostel_store::NewAnnouncement;
use serde_json::Value;

use crate::{
    handlers::{success, success_message},
    ApiError, ApiResult, AppState,
};

pub async fn list_announcements(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let announcements = state.store.list_announcements()?;
    Ok(success(announcements))
}

pub async fn create_announcement(
    State(state): State<AppState>,
    Json(request): Json<NewAnnouncement>,
) -> ApiResult<Json<Value>> {
    if request.title.is_empty() || request.message.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.store.create_announcement(&request)?;
    Ok(success_message("Announcement published successfully"))
}
