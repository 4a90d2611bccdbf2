//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{RestaurantPatch, RestaurantRecord};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<RestaurantRecord>> {
        let restaurant: Option<RestaurantRecord> = self.base.db().select(id.clone()).await?;
        Ok(restaurant)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<RestaurantRecord>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let restaurants: Vec<RestaurantRecord> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Check whether a display name is taken by another restaurant
    pub async fn is_name_taken(
        &self,
        name: &str,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let existing = self.find_by_name(name).await?;
        Ok(match (existing, exclude) {
            (Some(found), Some(id)) => found.id.as_ref() != Some(id),
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    pub async fn create(&self, data: RestaurantRecord) -> RepoResult<RestaurantRecord> {
        let created: Option<RestaurantRecord> =
            self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Apply a partial profile update
    pub async fn update(
        &self,
        id: &RecordId,
        data: RestaurantPatch,
    ) -> RepoResult<RestaurantRecord> {
        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.restaurant_token.is_some() {
            set_parts.push("restaurant_token = $restaurant_token");
        }
        if data.table_count.is_some() {
            set_parts.push("table_count = $table_count");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.head_img.is_some() {
            set_parts.push("head_img = $head_img");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")));
        }
        set_parts.push("updated_at = $updated_at");

        let query_str = format!("UPDATE $id SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("id", id.clone()))
            .bind(("updated_at", chrono::Utc::now()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.restaurant_token {
            query = query.bind(("restaurant_token", v));
        }
        if let Some(v) = data.table_count {
            query = query.bind(("table_count", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.head_img {
            query = query.bind(("head_img", v));
        }

        let mut result = query.await?;
        let restaurants: Vec<RestaurantRecord> = result.take(0)?;
        restaurants
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
    }

    /// Link the lazily-created menu aggregate
    pub async fn set_menu(&self, id: &RecordId, menu: &RecordId) -> RepoResult<RestaurantRecord> {
        self.set_link(id, "menu", menu).await
    }

    /// Link the order ledger created at registration
    pub async fn set_order_ledger(
        &self,
        id: &RecordId,
        ledger: &RecordId,
    ) -> RepoResult<RestaurantRecord> {
        self.set_link(id, "order_ledger", ledger).await
    }

    async fn set_link(
        &self,
        id: &RecordId,
        field: &str,
        target: &RecordId,
    ) -> RepoResult<RestaurantRecord> {
        let query_str =
            format!("UPDATE $id SET {field} = $target, updated_at = $updated_at RETURN AFTER");
        let mut result = self
            .base
            .db()
            .query(&query_str)
            .bind(("id", id.clone()))
            .bind(("target", target.clone()))
            .bind(("updated_at", chrono::Utc::now()))
            .await?;
        let restaurants: Vec<RestaurantRecord> = result.take(0)?;
        restaurants
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let result: Option<RestaurantRecord> = self.base.db().delete(id.clone()).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
        }
        Ok(())
    }
}
