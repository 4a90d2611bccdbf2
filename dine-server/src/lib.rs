//! Dine Server - restaurant ordering backend
//!
//! # Architecture
//!
//! Two HTTP listeners share one embedded-database state:
//!
//! - **Staff API**: menu management, order ledger reads/transitions and
//!   restaurant administration, authenticated via a `token` query
//!   parameter (JWT).
//! - **Provider API**: anonymous order upload/view for table-side
//!   clients that only hold an opaque ledger id.
//!
//! # Module layout
//!
//! ```text
//! dine-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # JWT issuing/verification, staff middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB: records + repositories
//! ├── menu/          # menu service (dish registry + views)
//! ├── orders/        # order ledger service
//! ├── restaurant/    # registration, binding, cascade delete
//! ├── services/      # notifier, verification code
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod menu;
pub mod orders;
pub mod restaurant;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use menu::MenuService;
pub use orders::OrderService;
pub use restaurant::RestaurantService;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____  _
   / __ \(_)___  ___
  / / / / / __ \/ _ \
 / /_/ / / / / /  __/
/_____/_/_/ /_/\___/
    "#
    );
}
