//! Restaurant API Handlers

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    AdminUpdateRestaurant, ConnectRestaurant, DeleteRestaurant, RegisterRestaurant,
    UpdateRestaurantProfile,
};

/// GET /v1/restaurant/get-rest
pub async fn get_rest(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<shared::Restaurant>> {
    let restaurant = state.restaurant_service().current(&user).await?;
    Ok(Json(restaurant))
}

/// POST /v1/restaurant/register-rest
pub async fn register_rest(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<RegisterRestaurant>,
) -> AppResult<Json<shared::Restaurant>> {
    payload.validate()?;
    let restaurant = state.restaurant_service().register(&user, payload).await?;
    Ok(Json(restaurant))
}

/// POST /v1/restaurant/connect-rest
pub async fn connect_rest(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<ConnectRestaurant>,
) -> AppResult<Json<shared::Restaurant>> {
    payload.validate()?;
    let restaurant = state.restaurant_service().connect(&user, payload).await?;
    Ok(Json(restaurant))
}

/// DELETE /v1/restaurant/disconnect-rest
pub async fn disconnect_rest(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<StatusCode> {
    state.restaurant_service().disconnect(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /v1/restaurant/update-rest-profile
pub async fn update_rest_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<UpdateRestaurantProfile>,
) -> AppResult<Json<shared::Restaurant>> {
    payload.validate()?;
    let restaurant = state
        .restaurant_service()
        .update_profile(&user, payload)
        .await?;
    Ok(Json(restaurant))
}

/// PATCH /v1/restaurant/update-rest
pub async fn update_rest(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<AdminUpdateRestaurant>,
) -> AppResult<Json<shared::Restaurant>> {
    payload.validate()?;
    let restaurant = state.restaurant_service().admin_update(payload).await?;
    Ok(Json(restaurant))
}

/// DELETE /v1/restaurant/delete-rest
pub async fn delete_rest(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<DeleteRestaurant>,
) -> AppResult<StatusCode> {
    payload.validate()?;
    state.restaurant_service().delete(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
