//! Error types for Cellgrid core.

use thiserror::Error;

use cellgrid_engine::FormulaError;

#[derive(Error, Debug)]
pub enum CellgridError {
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

pub type Result<T> = std::result::Result<T, CellgridError>;
