//! Order API Handlers (staff)

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{CompletedOrder, ProcessingOrder, TransitionOrderRequest};

/// GET /v1/order/get-processing-order
pub async fn get_processing_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ProcessingOrder>>> {
    let orders = state.order_service().processing(&user).await?;
    Ok(Json(orders))
}

/// GET /v1/order/get-completed-order
pub async fn get_completed_order(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CompletedOrder>>> {
    let orders = state.order_service().completed(&user).await?;
    Ok(Json(orders))
}

/// POST /v1/order/order-transition
pub async fn order_transition(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<TransitionOrderRequest>,
) -> AppResult<Json<CompletedOrder>> {
    payload.validate()?;
    let completed = state.order_service().transition(&user, payload).await?;
    Ok(Json(completed))
}
