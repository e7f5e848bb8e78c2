//! Sheet document: one grid plus the coordinator that edits it.

mod sample;
mod sheet;

pub use sheet::{CellSummary, Sheet};
