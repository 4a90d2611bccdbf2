//! Menu API Handlers

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{
    CategoryMap, DishByName, DishCreate, DishRef, DishUpdate, MenuViews, SortCategory, SortFeature,
};

/// GET /v1/menu/get-dishes
pub async fn get_dishes(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<DishRef>>> {
    let views = state.menu_service().views(&user).await?;
    Ok(Json(views.dishes))
}

/// GET /v1/menu/get-feature
pub async fn get_feature(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<DishRef>>> {
    let views = state.menu_service().views(&user).await?;
    Ok(Json(views.feature))
}

/// GET /v1/menu/get-category
pub async fn get_category(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CategoryMap>> {
    let views = state.menu_service().views(&user).await?;
    Ok(Json(views.category))
}

/// POST /v1/menu/add-dishes
pub async fn add_dishes(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<DishCreate>,
) -> AppResult<(StatusCode, Json<shared::Dish>)> {
    payload.validate()?;
    let dish = state.menu_service().add_dish(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

/// POST /v1/menu/find-dishes
pub async fn find_dishes(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<DishByName>,
) -> AppResult<Json<shared::Dish>> {
    payload.validate()?;
    let dish = state.menu_service().find_dish(&user, &payload.name).await?;
    Ok(Json(dish))
}

/// DELETE /v1/menu/delete-dishes
pub async fn delete_dishes(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<DishByName>,
) -> AppResult<StatusCode> {
    payload.validate()?;
    state.menu_service().delete_dish(&user, &payload.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /v1/menu/update-dishes
pub async fn update_dishes(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<DishUpdate>,
) -> AppResult<Json<shared::Dish>> {
    payload.validate()?;
    let dish = state.menu_service().update_dish(&user, payload).await?;
    Ok(Json(dish))
}

/// POST /v1/menu/sort-feature
pub async fn sort_feature(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<SortFeature>,
) -> AppResult<Json<MenuViews>> {
    let views = state.menu_service().sort_feature(&user, payload).await?;
    Ok(Json(views))
}

/// POST /v1/menu/sort-category
pub async fn sort_category(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<SortCategory>,
) -> AppResult<Json<MenuViews>> {
    let views = state.menu_service().sort_category(&user, payload).await?;
    Ok(Json(views))
}
