//! cellgrid_engine - Sparse spreadsheet grid and formula evaluation.

pub mod engine;
pub mod error;
pub mod procedures;

pub use error::{FormulaError, Result};
