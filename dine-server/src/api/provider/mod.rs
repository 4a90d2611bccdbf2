//! Provider API
//!
//! Served on the provider listener only. Callers authenticate with
//! nothing but the opaque ledger id embedded in their table setup.

use axum::{Router, routing::post};

use crate::core::ServerState;

pub mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/v1/order/view-order", post(handler::view_order))
        .route("/v1/order/upload-order", post(handler::upload_order))
}
