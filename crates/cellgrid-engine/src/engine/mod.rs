//! Spreadsheet engine API.
//!
//! - [`Coord`] - Coordinate parsing (`"B7"` ↔ row/column indices)
//! - [`Cell`], [`Grid`] - Sparse cell storage and on-demand evaluation
//! - [`tokenize`] - Split formula text into tokens
//! - [`evaluate`] - Evaluate raw cell text against a grid
//! - [`format_fixed`], [`format_number`] - Display formatting for numbers

mod coord;
mod eval;
mod format;
mod grid;
mod tokenize;

pub use coord::{COLUMNS, Coord, MAX_COL, MAX_ROW, ROWS, col_letter, is_reference_token};
pub use eval::{MAX_NESTING_DEPTH, MAX_REFERENCE_DEPTH, Value, evaluate};
pub use format::{format_fixed, format_number};
pub use grid::{Cell, Grid};
pub use tokenize::{Token, tokenize};
