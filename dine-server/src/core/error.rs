//! Server-level errors

use thiserror::Error;

use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
