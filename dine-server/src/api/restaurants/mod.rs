//! Restaurant API

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/v1/restaurant/get-rest", get(handler::get_rest))
        .route("/v1/restaurant/register-rest", post(handler::register_rest))
        .route("/v1/restaurant/connect-rest", post(handler::connect_rest))
        .route(
            "/v1/restaurant/disconnect-rest",
            delete(handler::disconnect_rest),
        )
        .route(
            "/v1/restaurant/update-rest-profile",
            patch(handler::update_rest_profile),
        )
        .route("/v1/restaurant/update-rest", patch(handler::update_rest))
        .route("/v1/restaurant/delete-rest", delete(handler::delete_rest))
}
