//! Menu Repository
//!
//! Persists the menu aggregate. View mutations happen in memory on
//! [`MenuRecord`]; `save_views` writes all three views in one statement,
//! conditional on the version the caller read.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::MenuRecord;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu";

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuRecord>> {
        let menu: Option<MenuRecord> = self.base.db().select(id.clone()).await?;
        Ok(menu)
    }

    pub async fn create(&self, data: MenuRecord) -> RepoResult<MenuRecord> {
        let created: Option<MenuRecord> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu".to_string()))
    }

    /// Persist the aggregate's views with an optimistic-concurrency
    /// check: the write only applies when the stored version still
    /// matches the one the caller loaded. A lost race surfaces as
    /// [`RepoError::Conflict`]; the caller re-reads and retries.
    pub async fn save_views(&self, menu: &MenuRecord) -> RepoResult<MenuRecord> {
        let id = menu
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("menu record has no id".into()))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET dishes = $dishes, feature = $feature, category = $category, \
                 update_by = $update_by, updated_at = $updated_at, version = version + 1 \
                 WHERE version = $version RETURN AFTER",
            )
            .bind(("id", id))
            .bind(("dishes", menu.dishes.clone()))
            .bind(("feature", menu.feature.clone()))
            .bind(("category", menu.category.clone()))
            .bind(("update_by", menu.update_by.clone()))
            .bind(("updated_at", chrono::Utc::now()))
            .bind(("version", menu.version))
            .await?;
        let menus: Vec<MenuRecord> = result.take(0)?;
        menus
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Conflict("menu was modified concurrently".into()))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let _: Option<MenuRecord> = self.base.db().delete(id.clone()).await?;
        Ok(())
    }
}
