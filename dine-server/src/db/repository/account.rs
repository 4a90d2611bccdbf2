//! Account Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Account;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "account";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_subject(&self, subject: &str) -> RepoResult<Option<Account>> {
        let subject_owned = subject.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE subject = $subject LIMIT 1")
            .bind(("subject", subject_owned))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Fetch the account for a token subject, creating it on first sight.
    pub async fn get_or_create(&self, subject: &str, name: &str) -> RepoResult<Account> {
        if let Some(existing) = self.find_by_subject(subject).await? {
            return Ok(existing);
        }
        let created: Option<Account> = self
            .base
            .db()
            .create(TABLE)
            .content(Account::new(subject, name))
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }

    /// Bind or clear the account's restaurant connection.
    pub async fn set_restaurant(
        &self,
        subject: &str,
        restaurant: Option<RecordId>,
    ) -> RepoResult<Account> {
        let subject_owned = subject.to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE account SET restaurant = $restaurant WHERE subject = $subject RETURN AFTER")
            .bind(("subject", subject_owned))
            .bind(("restaurant", restaurant))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        accounts
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Account '{subject}' not found")))
    }

    /// Clear the binding of every account connected to a restaurant
    /// (restaurant cascade delete).
    pub async fn unbind_restaurant(&self, restaurant: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE account SET restaurant = NONE WHERE restaurant = $restaurant")
            .bind(("restaurant", restaurant.clone()))
            .await?;
        Ok(())
    }
}
