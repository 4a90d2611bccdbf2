//! Order ledger models
//!
//! A ledger holds the in-flight `processing` list and the append-only
//! `completed` list for one restaurant. Entries are embedded values,
//! keyed inside the processing list by table number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line item of a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(length(min = 1, message = "itemName must not be empty"))]
    pub item_name: String,
    #[validate(range(min = 0.0, message = "itemPrice is no less than 0"))]
    pub item_price: f64,
    #[validate(range(min = 1, message = "itemNumber must be at least 1"))]
    pub item_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

/// An in-flight order for one table. At most one processing order exists
/// per table number at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingOrder {
    pub id: String,
    pub order_table: u32,
    pub order_item: Vec<OrderItem>,
    pub total_price: f64,
    pub order_start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_note: Option<String>,
}

/// Terminal outcome of a completed order. Closed set; anything else is
/// rejected at the HTTP boundary during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeType {
    Success,
    Cancel,
    Refund,
    #[serde(rename = "Partial Success")]
    PartialSuccess,
}

/// A finalized order: the processing order's full field set plus the
/// completion fields. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    pub id: String,
    pub order_table: u32,
    pub order_item: Vec<OrderItem>,
    pub total_price: f64,
    pub order_start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_updated_time: Option<DateTime<Utc>>,
    pub order_completed_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub outcome: OutcomeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_note: Option<String>,
}

// ========== Request payloads ==========

/// POST (provider) /order/view-order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ViewOrderRequest {
    #[validate(length(min = 1, message = "orderId must not be empty"))]
    pub order_id: String,
    pub order_table: u32,
}

/// POST (provider) /order/upload-order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadOrderRequest {
    #[validate(length(min = 1, message = "orderId must not be empty"))]
    pub order_id: String,
    pub order_table: u32,
    #[validate(nested)]
    #[serde(default)]
    pub order_item: Vec<OrderItem>,
    #[validate(range(min = 0.0, message = "totalPrice is no less than 0"))]
    pub total_price: f64,
    pub time: DateTime<Utc>,
    pub guest_note: Option<String>,
}

/// POST /order/order-transition (staff)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOrderRequest {
    pub order_table: u32,
    pub order_completed_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub outcome: OutcomeType,
    pub manager_note: Option<String>,
}
