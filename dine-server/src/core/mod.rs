//! Core module: configuration, state and the server itself
//!
//! # Structure
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state behind both listeners
//! - [`Server`] - listener setup and serve loop
//! - [`ServerError`] - top-level errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
