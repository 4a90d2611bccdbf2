//! Shared types for the dine backend
//!
//! Wire-level models and request payloads used by both HTTP listeners
//! (staff and provider) and by integration tests. Persistence-layer
//! record types live in `dine-server::db::models`; the types here carry
//! plain string ids only.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CategoryMap, CompletedOrder, Dish, DishRef, OrderItem, OutcomeType, ProcessingOrder,
    Restaurant,
};
