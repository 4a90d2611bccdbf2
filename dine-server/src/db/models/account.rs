//! Account Record
//!
//! Token issuance is external; the server only stores which restaurant
//! a subject is bound to, because connect/disconnect mutate it.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<RecordId>,
    /// Token subject (opaque identity from the resolver)
    pub subject: String,
    pub name: String,
    /// Record link to the connected restaurant, if any
    pub restaurant: Option<RecordId>,
}

impl Account {
    pub fn new(subject: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            name: name.into(),
            restaurant: None,
        }
    }
}
