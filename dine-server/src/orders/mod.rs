//! Order Service
//!
//! Provider-facing upload/view of in-flight orders and staff-facing
//! ledger reads plus the processing-to-completed transition. Every
//! mutation loads the restaurant's ledger record, mutates both lists in
//! memory and persists them in a single version-checked write, so a
//! table is never visible as both active and archived.

use std::sync::Arc;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::warn;

use shared::models::{
    CompletedOrder, ProcessingOrder, TransitionOrderRequest, UploadOrderRequest, ViewOrderRequest,
};

use crate::auth::CurrentUser;
use crate::db::models::{OrderLedgerRecord, RestaurantRecord, UploadOutcome};
use crate::db::repository::{AccountRepository, OrderRepository, RestaurantRepository};
use crate::services::Notifier;
use crate::utils::{AppError, AppResult};

const LEDGER_TABLE: &str = "order_ledger";

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    restaurants: RestaurantRepository,
    accounts: AccountRepository,
    notifier: Arc<dyn Notifier>,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            accounts: AccountRepository::new(db),
            notifier,
        }
    }

    /// Parse the opaque ledger id a provider carries. Anything that is
    /// not a well-formed ledger record id is treated as unknown.
    fn parse_ledger_id(raw: &str) -> Option<RecordId> {
        let (table, key) = raw.split_once(':')?;
        (table == LEDGER_TABLE && !key.is_empty())
            .then(|| RecordId::from_table_key(table, key))
    }

    async fn load_ledger_by_raw_id(&self, raw: &str) -> AppResult<OrderLedgerRecord> {
        let not_found = || AppError::not_found(format!("Orders ID '{raw}' doesn't have order list"));
        let id = Self::parse_ledger_id(raw).ok_or_else(not_found)?;
        self.orders.find_by_id(&id).await?.ok_or_else(not_found)
    }

    async fn connected_restaurant(&self, user: &CurrentUser) -> AppResult<RestaurantRecord> {
        let account = self
            .accounts
            .find_by_subject(&user.subject)
            .await?
            .ok_or_else(|| AppError::not_found("You haven't connected to a restaurant"))?;
        let restaurant_id = account
            .restaurant
            .ok_or_else(|| AppError::not_found("You haven't connected to a restaurant"))?;
        self.restaurants
            .find_by_id(&restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant not found"))
    }

    async fn staff_ledger(&self, user: &CurrentUser) -> AppResult<OrderLedgerRecord> {
        let restaurant = self.connected_restaurant(user).await?;
        let ledger_id = restaurant
            .order_ledger
            .as_ref()
            .ok_or_else(|| AppError::not_found("The restaurant doesn't have an order list"))?;
        self.orders
            .find_by_id(ledger_id)
            .await?
            .ok_or_else(|| AppError::not_found("The restaurant doesn't have an order list"))
    }

    /// Provider upload: upsert the table's in-flight order by table
    /// number, then notify staff. Notification failures are logged and
    /// dropped; the upload has already been persisted.
    pub async fn upload(&self, input: UploadOrderRequest) -> AppResult<ProcessingOrder> {
        let mut ledger = self.load_ledger_by_raw_id(&input.order_id).await?;

        let table = input.order_table;
        let outcome = ledger.upsert_processing(
            table,
            input.order_item,
            input.total_price,
            input.time,
            input.guest_note,
        );
        let saved = self.orders.save_lists(&ledger).await?;

        let message = match outcome {
            UploadOutcome::Created => format!("You have an new order at TABLE {table}."),
            UploadOutcome::Updated => format!("You have an updated order at TABLE {table}."),
        };
        if let Err(e) = self.notifier.notify(&message).await {
            warn!(table, error = %e, "order notification dropped");
        }

        saved
            .find_processing(table)
            .cloned()
            .ok_or_else(|| AppError::database("uploaded order missing after save"))
    }

    /// Provider view: the table's in-flight order. An inactive table is
    /// indistinguishable from an archived one and maps to NotFound.
    pub async fn view(&self, input: ViewOrderRequest) -> AppResult<ProcessingOrder> {
        let ledger = self.load_ledger_by_raw_id(&input.order_id).await?;
        let table = input.order_table;
        ledger
            .find_processing(table)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Table {table} doesn't have an order")))
    }

    /// Staff read of the in-flight list.
    pub async fn processing(&self, user: &CurrentUser) -> AppResult<Vec<ProcessingOrder>> {
        Ok(self.staff_ledger(user).await?.processing_order)
    }

    /// Staff read of the archive.
    pub async fn completed(&self, user: &CurrentUser) -> AppResult<Vec<CompletedOrder>> {
        Ok(self.staff_ledger(user).await?.completed_order)
    }

    /// Close out a table: move its active order into the archive with
    /// the supplied outcome. Both list changes land in one write.
    pub async fn transition(
        &self,
        user: &CurrentUser,
        input: TransitionOrderRequest,
    ) -> AppResult<CompletedOrder> {
        let mut ledger = self.staff_ledger(user).await?;

        let table = input.order_table;
        let completed = ledger
            .transition(
                table,
                input.order_completed_time,
                input.outcome,
                input.manager_note,
            )
            .ok_or_else(|| AppError::not_found(format!("Table {table} doesn't have an order")))?;
        self.orders.save_lists(&ledger).await?;

        Ok(completed)
    }
}
