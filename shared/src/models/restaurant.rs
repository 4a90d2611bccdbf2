//! Restaurant models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_six_digits;

/// Restaurant profile as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Six-digit connection token staff use to bind their account.
    pub restaurant_token: String,
    pub table_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// POST /restaurant/register-rest payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRestaurant {
    #[validate(custom(function = validate_six_digits))]
    pub verification_code: String,
    #[validate(custom(function = validate_six_digits))]
    pub restaurant_token: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub table_count: u32,
    pub description: Option<String>,
    pub head_img: Option<String>,
}

/// POST /restaurant/connect-rest payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRestaurant {
    #[validate(custom(function = validate_six_digits))]
    pub restaurant_token: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// PATCH /restaurant/update-rest-profile payload (staff self-service)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRestaurantProfile {
    #[validate(custom(function = validate_six_digits))]
    pub restaurant_token: Option<String>,
    pub table_count: Option<u32>,
    pub description: Option<String>,
    pub head_img: Option<String>,
}

/// PATCH /restaurant/update-rest payload (admin, keyed by old name)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateRestaurant {
    #[validate(length(min = 1, message = "oldName must not be empty"))]
    pub old_name: String,
    pub name: Option<String>,
    #[validate(custom(function = validate_six_digits))]
    pub restaurant_token: Option<String>,
    pub table_count: Option<u32>,
    pub description: Option<String>,
    pub head_img: Option<String>,
}

/// DELETE /restaurant/delete-rest payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteRestaurant {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}
