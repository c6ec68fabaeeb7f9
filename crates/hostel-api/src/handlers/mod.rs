use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

pub mod announcements;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod maintenance;
pub mod menu;
pub mod payments;
pub mod room_changes;
pub mod rooms;
pub mod waiting_list;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// `{ "success": true, "data": ... }`, the envelope every data endpoint
/// returns.
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

/// `{ "success": true, "message": ... }` for write acknowledgements.
pub(crate) fn success_message(message: impl Into<String>) -> Json<Value> {
    Json(json!({ "success": true, "message": message.into() }))
}
