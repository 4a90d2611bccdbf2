//! Order API (staff)

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/v1/order/get-processing-order",
            get(handler::get_processing_order),
        )
        .route(
            "/v1/order/get-completed-order",
            get(handler::get_completed_order),
        )
        .route("/v1/order/order-transition", post(handler::order_transition))
}
