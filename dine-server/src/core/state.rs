use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::menu::MenuService;
use crate::orders::OrderService;
use crate::restaurant::RestaurantService;
use crate::services::{LogNotifier, Notifier, VerificationCode, WebhookNotifier};

/// Shared server state
///
/// One instance backs both listeners. Cloning is shallow; every field
/// is either `Clone`-cheap or behind an `Arc`.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | db | embedded database handle |
/// | jwt | staff token service |
/// | notifier | order notification sink |
/// | verification | rotating registration code |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt: Arc<JwtService>,
    pub notifier: Arc<dyn Notifier>,
    pub verification: Arc<VerificationCode>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt: Arc<JwtService>,
        notifier: Arc<dyn Notifier>,
        verification: Arc<VerificationCode>,
    ) -> Self {
        Self {
            config,
            db,
            jwt,
            notifier,
            verification,
        }
    }

    /// Initialize the state: work directory layout, database, token
    /// service, notifier and verification code.
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("dine.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt = Arc::new(JwtService::new(config.jwt.clone()));
        let notifier: Arc<dyn Notifier> = match &config.notify_url {
            Some(url) => Arc::new(WebhookNotifier::new(url.clone())),
            None => Arc::new(LogNotifier),
        };
        let verification = Arc::new(VerificationCode::new(Duration::from_secs(
            config.verification_rotate_hours * 3600,
        )));

        Ok(Self::new(
            config.clone(),
            db_service.db,
            jwt,
            notifier,
            verification,
        ))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn menu_service(&self) -> MenuService {
        MenuService::new(self.db.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.notifier.clone())
    }

    pub fn restaurant_service(&self) -> RestaurantService {
        RestaurantService::new(self.db.clone(), self.verification.clone())
    }
}
