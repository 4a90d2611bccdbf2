//! Persistence-layer record types
//!
//! Records carry `Option<RecordId>` ids (`None` before creation, set by
//! the database). Wire types with string ids live in `shared`; the
//! conversions are implemented next to each record.
//!
//! The menu and order ledger records are *aggregates*: every
//! denormalized view they hold is a field of the one record, mutated in
//! memory and persisted with a single version-checked write.

pub mod account;
pub mod dish;
pub mod menu;
pub mod order;
pub mod restaurant;

// Re-exports
pub use account::Account;
pub use dish::{DishPatch, DishRecord};
pub use menu::MenuRecord;
pub use order::{OrderLedgerRecord, UploadOutcome};
pub use restaurant::{RestaurantPatch, RestaurantRecord};
