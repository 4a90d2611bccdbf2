//! Data models
//!
//! Shared between the staff and provider API surfaces (and the test
//! clients). All ids are strings in `table:key` form.

pub mod dish;
pub mod order;
pub mod restaurant;

// Re-exports
pub use dish::*;
pub use order::*;
pub use restaurant::*;

/// Six-digit numeric code check, used by restaurant connection tokens
/// and registration verification codes.
pub fn validate_six_digits(value: &str) -> Result<(), validator::ValidationError> {
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("six_digits"))
    }
}
