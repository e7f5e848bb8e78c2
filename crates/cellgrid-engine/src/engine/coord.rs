//! Coordinate parsing and formatting.
//!
//! Converts between a zero-based `(row, column)` pair and the canonical key
//! used in formulas: one uppercase column letter followed by the decimal row.
//!
//! # Examples
//!
//! ```
//! use cellgrid_engine::engine::Coord;
//!
//! let coord = Coord::parse("B7").unwrap();
//! assert_eq!(coord.col, 1);
//! assert_eq!(coord.row, 7);
//! assert_eq!(coord.key(), "B7");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{FormulaError, Result};

/// Number of rows in the grid.
pub const ROWS: usize = 100;
/// Number of single-letter columns (A-Z).
pub const COLUMNS: usize = 26;
pub const MAX_ROW: usize = ROWS - 1;
pub const MAX_COL: usize = COLUMNS - 1;

/// A cell position inside the fixed `100 x 26` grid.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// Parse a key like `"B7"`. Only one column letter is accepted and the
    /// row must fall inside the grid.
    pub fn parse(text: &str) -> Result<Coord> {
        let caps = key_re()
            .captures(text)
            .ok_or_else(|| FormulaError::MalformedReference(text.to_string()))?;

        let col = (caps["letter"].as_bytes()[0] - b'A') as usize;
        let row = caps["row"]
            .parse::<usize>()
            .ok()
            .filter(|row| *row <= MAX_ROW)
            .ok_or_else(|| FormulaError::MalformedReference(text.to_string()))?;

        Ok(Coord::new(row, col))
    }

    /// Canonical key for this coordinate.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Move by a delta, clamping to the grid bounds.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Coord {
        Coord {
            row: self.row.saturating_add_signed(d_row).min(MAX_ROW),
            col: self.col.saturating_add_signed(d_col).min(MAX_COL),
        }
    }
}

/// Column letter for a zero-based column index (0 -> A, 25 -> Z).
pub fn col_letter(col: usize) -> char {
    debug_assert!(col < COLUMNS);
    (b'A' + col as u8) as char
}

/// True if `token` has the shape of a cell reference (`[A-Z]+[0-9]+`).
///
/// Multi-letter columns match here and are later rejected by [`Coord::parse`].
pub fn is_reference_token(token: &str) -> bool {
    reference_re().is_match(token)
}

fn key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<row>[0-9]+)$").expect("cell key regex must compile")
    })
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]+[0-9]+$").expect("reference regex must compile"))
}

impl std::str::FromStr for Coord {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        Coord::parse(s)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_letter(self.col), self.row)
    }
}
