use axum::{
    extract::{Path, Query, State},
    Json,
};
use hostel_core::ComplaintStatus;
use hostel_store::NewComplaint;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    handlers::{success, success_message},
    ApiError, ApiResult, AppState,
};

#[derive(Deserialize)]
pub struct ComplaintFilter {
    pub student_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateComplaintRequest {
    pub status: ComplaintStatus,
}

pub async fn list_complaints(
    State(state): State<AppState>,
    Query(filter): Query<ComplaintFilter>,
) -> ApiResult<Json<Value>> {
    let complaints = state.store.list_complaints(filter.student_id)?;
    Ok(success(complaints))
}

pub async fn create_complaint(
    State(state): State<AppState>,
    Json(request): Json<NewComplaint>,
) -> ApiResult<Json<Value>> {
    if request.complaint_type.is_empty() || request.description.is_empty() {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.store.create_complaint(&request)?;
    Ok(success_message("Complaint raised successfully"))
}

pub async fn update_complaint(
    State(state): State<AppState>,
    Path(complaint_id): Path<i64>,
    Json(request): Json<UpdateComplaintRequest>,
) -> ApiResult<Json<Value>> {
    state
        .store
        .update_complaint_status(complaint_id, request.status)?;
    Ok(success_message("Complaint updated successfully"))
}
