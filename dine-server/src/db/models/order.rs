//! Order Ledger Aggregate
//!
//! One record per restaurant: the in-flight `processing_order` list and
//! the append-only `completed_order` list. Both lists are fields of the
//! same record, so the processing->completed transition is persisted as
//! one write: a table can never show as both active and archived.
//!
//! Table lifecycle: Absent -> Active (entry in `processing_order`) ->
//! Archived (moved to `completed_order`). A new upload for an archived
//! table starts over from Absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{CompletedOrder, OrderItem, OutcomeType, ProcessingOrder};
use surrealdb::RecordId;

pub type OrderLedgerId = RecordId;

/// Whether an upload created a fresh table entry or merged into the
/// active one. Decides the customer notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLedgerRecord {
    pub id: Option<OrderLedgerId>,
    /// Record link to the owning restaurant
    pub restaurant: RecordId,
    #[serde(default)]
    pub processing_order: Vec<ProcessingOrder>,
    #[serde(default)]
    pub completed_order: Vec<CompletedOrder>,
    /// Optimistic-concurrency counter, bumped on every persisted write
    #[serde(default)]
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderLedgerRecord {
    /// Empty ledger, created at restaurant registration.
    pub fn empty(restaurant: RecordId, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            restaurant,
            processing_order: Vec::new(),
            completed_order: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The active order for a table, if any.
    pub fn find_processing(&self, table: u32) -> Option<&ProcessingOrder> {
        self.processing_order
            .iter()
            .find(|o| o.order_table == table)
    }

    /// Upsert by table number: an active table is merged in place
    /// (`order_start_time` untouched, `order_updated_time` set to the
    /// event time); an absent table gets a fresh entry.
    pub fn upsert_processing(
        &mut self,
        table: u32,
        items: Vec<OrderItem>,
        total_price: f64,
        event_time: DateTime<Utc>,
        guest_note: Option<String>,
    ) -> UploadOutcome {
        if let Some(existing) = self
            .processing_order
            .iter_mut()
            .find(|o| o.order_table == table)
        {
            existing.order_item = items;
            existing.total_price = total_price;
            existing.guest_note = guest_note;
            existing.order_updated_time = Some(event_time);
            UploadOutcome::Updated
        } else {
            self.processing_order.push(ProcessingOrder {
                id: uuid::Uuid::new_v4().to_string(),
                order_table: table,
                order_item: items,
                total_price,
                order_start_time: event_time,
                order_updated_time: None,
                guest_note,
            });
            UploadOutcome::Created
        }
    }

    /// Move the table's active order into the completed list. Both list
    /// mutations happen here, in memory; the caller persists the record
    /// once. Returns `None` when the table has no active order.
    pub fn transition(
        &mut self,
        table: u32,
        completed_time: DateTime<Utc>,
        outcome: OutcomeType,
        manager_note: Option<String>,
    ) -> Option<CompletedOrder> {
        let pos = self
            .processing_order
            .iter()
            .position(|o| o.order_table == table)?;
        let source = self.processing_order.remove(pos);

        let completed = CompletedOrder {
            id: source.id,
            order_table: source.order_table,
            order_item: source.order_item,
            total_price: source.total_price,
            order_start_time: source.order_start_time,
            order_updated_time: source.order_updated_time,
            order_completed_time: completed_time,
            outcome,
            guest_note: source.guest_note,
            manager_note,
        };
        self.completed_order.push(completed.clone());
        Some(completed)
    }
}
