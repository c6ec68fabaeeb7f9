use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{handlers::success, ApiResult, AppState};

pub async fn admin_dashboard(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let dashboard = state.store.admin_dashboard()?;
    Ok(success(dashboard))
}

pub async fn student_dashboard(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let dashboard = state.store.student_dashboard(student_id)?;
    Ok(success(dashboard))
}
