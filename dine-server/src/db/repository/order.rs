//! Order Ledger Repository
//!
//! Persists the per-restaurant order ledger. Both lists are fields of
//! the one record; `save_lists` writes them together, version-checked,
//! so a transition is visible either completely or not at all.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::OrderLedgerRecord;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order_ledger";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<OrderLedgerRecord>> {
        let ledger: Option<OrderLedgerRecord> = self.base.db().select(id.clone()).await?;
        Ok(ledger)
    }

    pub async fn create(&self, data: OrderLedgerRecord) -> RepoResult<OrderLedgerRecord> {
        let created: Option<OrderLedgerRecord> =
            self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order ledger".to_string()))
    }

    /// Persist both lists in one version-checked write.
    pub async fn save_lists(&self, ledger: &OrderLedgerRecord) -> RepoResult<OrderLedgerRecord> {
        let id = ledger
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("order ledger record has no id".into()))?;

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET processing_order = $processing, completed_order = $completed, \
                 updated_at = $updated_at, version = version + 1 \
                 WHERE version = $version RETURN AFTER",
            )
            .bind(("id", id))
            .bind(("processing", ledger.processing_order.clone()))
            .bind(("completed", ledger.completed_order.clone()))
            .bind(("updated_at", chrono::Utc::now()))
            .bind(("version", ledger.version))
            .await?;
        let ledgers: Vec<OrderLedgerRecord> = result.take(0)?;
        ledgers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Conflict("order ledger was modified concurrently".into()))
    }

    pub async fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let _: Option<OrderLedgerRecord> = self.base.db().delete(id.clone()).await?;
        Ok(())
    }
}
