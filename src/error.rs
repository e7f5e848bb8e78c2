//! Error types for the Cellgrid binary

use thiserror::Error;

use cellgrid_core::CellgridError;

/// Errors that can occur in the Cellgrid application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Sheet(#[from] CellgridError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
