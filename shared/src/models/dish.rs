//! Dish and menu-view models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lightweight `{id, name}` pointer stored inside the denormalized menu
/// views. Distinct from the authoritative [`Dish`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRef {
    pub id: String,
    pub name: String,
}

impl DishRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Category label -> ordered dish refs. A dish appears in exactly one
/// bucket at a time.
pub type CategoryMap = BTreeMap<String, Vec<DishRef>>;

/// Authoritative dish record as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub menu_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
    pub feature: bool,
    pub category: String,
    pub update_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// POST /menu/add-dishes payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DishCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "price is no less than 0"))]
    pub price: f64,
    #[serde(default)]
    pub feature: bool,
    #[serde(default = "default_category")]
    pub category: String,
}

pub fn default_category() -> String {
    "other".to_string()
}

/// POST /menu/find-dishes and DELETE /menu/delete-dishes payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishByName {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// PATCH /menu/update-dishes payload. `past_name` selects the dish; the
/// remaining fields are applied as a partial update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DishUpdate {
    #[validate(length(min = 1, message = "pastName must not be empty"))]
    pub past_name: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "price is no less than 0"))]
    pub price: Option<f64>,
    pub feature: Option<bool>,
    pub category: Option<String>,
}

/// POST /menu/sort-feature payload: full replacement of the feature view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortFeature {
    pub feature: Vec<DishRef>,
}

/// POST /menu/sort-category payload: full replacement of the category map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortCategory {
    pub category: CategoryMap,
}

/// The three denormalized menu views, as returned by the staff read
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuViews {
    pub dishes: Vec<DishRef>,
    pub feature: Vec<DishRef>,
    pub category: CategoryMap,
    pub update_by: String,
    pub version: u64,
}
