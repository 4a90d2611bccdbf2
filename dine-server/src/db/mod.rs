//! Database Module
//!
//! Embedded SurrealDB storage. The binary opens a RocksDB-backed
//! database under the work directory; tests use the in-memory engine.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "dine";
const DATABASE: &str = "dine";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `path`
    pub async fn new(path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        tracing::info!("Database opened at {path}");
        Ok(Self { db })
    }

    /// Open a fresh in-memory database (tests)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.db");

        let service = DbService::new(&path.to_string_lossy()).await.unwrap();
        let mut result = service.db.query("RETURN 1 + 1").await.unwrap();
        let value: Option<i64> = result.take(0).unwrap();
        assert_eq!(value, Some(2));
    }
}
