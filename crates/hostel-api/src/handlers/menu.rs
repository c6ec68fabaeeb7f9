use axum::{extract::State, Json};
use serde_json::Value;

use crate::{handlers::success, ApiResult, AppState};

pub async fn weekly_menu(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let menu = state.store.weekly_menu()?;
    Ok(success(menu))
}
