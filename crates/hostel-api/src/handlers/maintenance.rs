use axum::{extract::State, Json};
use hostel_store::NewMaintenanceRequest;
use serde_json::Value;

use crate::{
    handlers::{success, success_message},
    ApiError, ApiResult, AppState,
};

pub async fn list_maintenance(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let requests = state.store.list_maintenance()?;
    Ok(success(requests))
}

pub async fn create_maintenance(
    State(state): State<AppState>,
    Json(request): Json<NewMaintenanceRequest>,
) -> ApiResult<Json<Value>> {
    if request.category.is_empty() || request.description.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.store.create_maintenance(&request)?;
    Ok(success_message("Maintenance request created successfully"))
}
