//! Dish Record
//!
//! Authoritative per-dish state. The menu aggregate only holds
//! `{id, name}` refs pointing back at these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::DishCreate;
use surrealdb::RecordId;

pub type DishId = RecordId;

/// Dish record, scoped to one menu. Name is unique within its menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: Option<DishId>,
    /// Record link to the owning menu
    pub menu: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub feature: bool,
    #[serde(default = "shared::models::default_category")]
    pub category: String,
    /// Last editor identity
    pub update_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DishRecord {
    pub fn from_input(menu: RecordId, editor: &str, input: DishCreate, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            menu,
            name: input.name,
            description: input.description,
            image: input.image,
            price: input.price,
            feature: input.feature,
            category: input.category,
            update_by: editor.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to a dish record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub feature: Option<bool>,
    pub category: Option<String>,
}

impl From<DishRecord> for shared::Dish {
    fn from(d: DishRecord) -> Self {
        Self {
            id: d.id.map(|id| id.to_string()).unwrap_or_default(),
            menu_id: d.menu.to_string(),
            name: d.name,
            description: d.description,
            image: d.image,
            price: d.price,
            feature: d.feature,
            category: d.category,
            update_by: d.update_by,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
