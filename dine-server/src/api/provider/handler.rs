//! Provider API Handlers

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{ProcessingOrder, UploadOrderRequest, ViewOrderRequest};

/// POST /v1/order/view-order
pub async fn view_order(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ViewOrderRequest>,
) -> AppResult<Json<ProcessingOrder>> {
    payload.validate()?;
    let order = state.order_service().view(payload).await?;
    Ok(Json(order))
}

/// POST /v1/order/upload-order
pub async fn upload_order(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<UploadOrderRequest>,
) -> AppResult<(StatusCode, Json<ProcessingOrder>)> {
    payload.validate()?;
    let order = state.order_service().upload(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
