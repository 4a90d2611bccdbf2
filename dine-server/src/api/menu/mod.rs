//! Menu API

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub mod handler;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/v1/menu/get-dishes", get(handler::get_dishes))
        .route("/v1/menu/get-feature", get(handler::get_feature))
        .route("/v1/menu/get-category", get(handler::get_category))
        .route("/v1/menu/add-dishes", post(handler::add_dishes))
        .route("/v1/menu/find-dishes", post(handler::find_dishes))
        .route("/v1/menu/delete-dishes", delete(handler::delete_dishes))
        .route("/v1/menu/update-dishes", patch(handler::update_dishes))
        .route("/v1/menu/sort-feature", post(handler::sort_feature))
        .route("/v1/menu/sort-category", post(handler::sort_category))
}
