use axum::{
    extract::{Path, State},
    Json,
};
use hostel_core::PaymentStatus;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    handlers::{success, success_message},
    ApiResult, AppState,
};

#[derive(Deserialize)]
pub struct UpdatePaymentRequest {
    pub status: PaymentStatus,
}

pub async fn list_payments(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let payments = state.store.list_payments()?;
    Ok(success(payments))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<i64>,
    Json(request): Json<UpdatePaymentRequest>,
) -> ApiResult<Json<Value>> {
    state.store.update_payment_status(payment_id, request.status)?;
    Ok(success_message("Payment updated successfully"))
}
