//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`AppResponse`] - error response envelope
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult};
pub use logger::{init_logger, init_logger_with_file};
