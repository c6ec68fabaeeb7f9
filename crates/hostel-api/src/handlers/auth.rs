use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{ApiError, ApiResult, AppState};

/// Both generations of the login form are accepted: the original sent
/// `email`, the later one `username`. Either identifies the account.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
    #[serde(rename = "userType", default = "LoginRequest::default_user_type")]
    pub user_type: String,
}

impl LoginRequest {
    fn default_user_type() -> String {
        "student".to_string()
    }

    fn identity(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.is_empty())
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let identity = request
        .identity()
        .ok_or_else(|| ApiError::Validation("Missing credentials".to_string()))?;

    let user = if request.user_type == "admin" {
        state
            .store
            .authenticate_admin(identity, &request.password)?
            .map(|admin| {
                json!({
                    "id": admin.admin_id,
                    "username": admin.username,
                    "type": "admin",
                })
            })
    } else {
        state
            .store
            .authenticate_student(identity, &request.password)?
            .map(|student| {
                json!({
                    "id": student.student_id,
                    "name": student.name,
                    "email": student.email,
                    "room_id": student.room_id,
                    "type": "student",
                })
            })
    };

    let user = user.ok_or(ApiError::Unauthorized)?;
    Ok(Json(json!({ "success": true, "user": user })))
}
