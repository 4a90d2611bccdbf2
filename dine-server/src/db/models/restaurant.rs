//! Restaurant Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type RestaurantId = RecordId;

/// Restaurant record. Holds the references to its menu and order ledger
/// aggregates; both are owned 1:1 but persisted as independent records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: Option<RestaurantId>,
    /// Globally unique display name
    pub name: String,
    /// Six-digit connection token
    pub restaurant_token: String,
    #[serde(default)]
    pub table_count: u32,
    pub description: Option<String>,
    pub head_img: Option<String>,
    /// Record link to the menu aggregate, set lazily on first add-dish
    pub menu: Option<RecordId>,
    /// Record link to the order ledger, created at registration
    pub order_ledger: Option<RecordId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantRecord {
    pub fn new(
        name: String,
        restaurant_token: String,
        table_count: u32,
        description: Option<String>,
        head_img: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            name,
            restaurant_token,
            table_count,
            description,
            head_img,
            menu: None,
            order_ledger: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to a restaurant record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub restaurant_token: Option<String>,
    pub table_count: Option<u32>,
    pub description: Option<String>,
    pub head_img: Option<String>,
}

impl From<RestaurantRecord> for shared::Restaurant {
    fn from(r: RestaurantRecord) -> Self {
        Self {
            id: r.id.map(|id| id.to_string()).unwrap_or_default(),
            name: r.name,
            restaurant_token: r.restaurant_token,
            table_count: r.table_count,
            description: r.description,
            head_img: r.head_img,
            menu_id: r.menu.map(|id| id.to_string()),
            order_id: r.order_ledger.map(|id| id.to_string()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
