//! Repository Module
//!
//! CRUD access to the embedded SurrealDB tables. Aggregate repositories
//! (menu, order ledger) persist with version-checked writes; a stale
//! version surfaces as [`RepoError::Conflict`] and the caller retries.

pub mod account;
pub mod dish;
pub mod menu;
pub mod order;
pub mod restaurant;

// Re-exports
pub use account::AccountRepository;
pub use dish::DishRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
