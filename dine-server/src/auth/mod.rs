//! Staff authentication: JWT issuing/verification and the axum
//! middleware that guards the staff listener.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_staff_auth;
