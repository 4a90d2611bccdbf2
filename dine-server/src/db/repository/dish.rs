//! Dish Repository
//!
//! Authoritative per-dish store (the Dish Registry). Name uniqueness is
//! checked here, against the records, never against the denormalized
//! menu views, so a drifted view cannot mask a duplicate.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DishPatch, DishRecord};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dish";

#[derive(Clone)]
pub struct DishRepository {
    base: BaseRepository,
}

impl DishRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<DishRecord>> {
        let dish: Option<DishRecord> = self.base.db().select(id.clone()).await?;
        Ok(dish)
    }

    /// Find a dish by name within one menu
    pub async fn find_by_name(&self, menu: &RecordId, name: &str) -> RepoResult<Option<DishRecord>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dish WHERE menu = $menu AND name = $name LIMIT 1")
            .bind(("menu", menu.clone()))
            .bind(("name", name_owned))
            .await?;
        let dishes: Vec<DishRecord> = result.take(0)?;
        Ok(dishes.into_iter().next())
    }

    pub async fn create(&self, data: DishRecord) -> RepoResult<DishRecord> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("price is no less than 0".into()));
        }
        let created: Option<DishRecord> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }

    /// Apply a partial update and stamp the editor
    pub async fn update(
        &self,
        id: &RecordId,
        editor: &str,
        data: DishPatch,
    ) -> RepoResult<DishRecord> {
        if matches!(data.price, Some(p) if p < 0.0) {
            return Err(RepoError::Validation("price is no less than 0".into()));
        }

        let mut set_parts: Vec<&str> = vec!["update_by = $update_by", "updated_at = $updated_at"];
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.feature.is_some() {
            set_parts.push("feature = $feature");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }

        let query_str = format!("UPDATE $id SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("id", id.clone()))
            .bind(("update_by", editor.to_string()))
            .bind(("updated_at", chrono::Utc::now()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.feature {
            query = query.bind(("feature", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }

        let mut result = query.await?;
        let dishes: Vec<DishRecord> = result.take(0)?;
        dishes
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Dish {id} not found")))
    }

    /// Put a record back to a known prior state. Compensation path for
    /// a failed aggregate write; skips the price check on purpose, the
    /// snapshot was already persisted once.
    pub async fn restore(&self, id: &RecordId, prior: &DishRecord) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $id SET name = $name, description = $description, image = $image, \
                 price = $price, feature = $feature, category = $category, \
                 update_by = $update_by, updated_at = $updated_at",
            )
            .bind(("id", id.clone()))
            .bind(("name", prior.name.clone()))
            .bind(("description", prior.description.clone()))
            .bind(("image", prior.image.clone()))
            .bind(("price", prior.price))
            .bind(("feature", prior.feature))
            .bind(("category", prior.category.clone()))
            .bind(("update_by", prior.update_by.clone()))
            .bind(("updated_at", prior.updated_at))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let result: Option<DishRecord> = self.base.db().delete(id.clone()).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Dish {id} not found")));
        }
        Ok(())
    }

    /// Remove every dish of a menu (restaurant cascade delete)
    pub async fn delete_by_menu(&self, menu: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE dish WHERE menu = $menu")
            .bind(("menu", menu.clone()))
            .await?;
        Ok(())
    }
}
