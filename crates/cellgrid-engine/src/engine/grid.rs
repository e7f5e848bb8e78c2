//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - Raw user text plus the error flag of its latest evaluation
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)
//!
//! Evaluated values are never stored. Every read re-evaluates the raw text.

use dashmap::DashMap;

use super::coord::Coord;
use super::eval::Evaluator;

/// The stored content of one coordinate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// User-entered text; empty means "no content".
    pub raw_value: String,
    /// Set by the most recent evaluation of this cell.
    pub error: bool,
}

impl Cell {
    pub fn new(raw_value: &str) -> Cell {
        Cell {
            raw_value: raw_value.to_string(),
            error: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw_value.is_empty()
    }
}

/// Sparse mapping from coordinate to cell.
///
/// Only cells that hold content or are currently selected should be present.
/// Callers (the selection coordinator) are responsible for deleting empty
/// cells when selection leaves them.
#[derive(Debug, Default)]
pub struct Grid {
    cells: DashMap<Coord, Cell>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    /// Return a snapshot of the cell at `coord`, inserting an empty one first
    /// if nothing is stored there.
    pub fn get_or_create_cell(&self, coord: Coord) -> Cell {
        self.cells.entry(coord).or_default().clone()
    }

    /// Remove the cell unconditionally.
    pub fn delete_cell(&self, coord: Coord) -> Option<Cell> {
        self.cells.remove(&coord).map(|(_, cell)| cell)
    }

    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(&coord).map(|cell| cell.clone())
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn raw_value(&self, coord: Coord) -> Option<String> {
        self.cells.get(&coord).map(|cell| cell.raw_value.clone())
    }

    pub fn has_error(&self, coord: Coord) -> bool {
        self.cells.get(&coord).is_some_and(|cell| cell.error)
    }

    /// Store raw text, creating the cell if needed. Empty text is stored as-is;
    /// removing empty cells is left to the caller.
    pub fn set_raw_value(&self, coord: Coord, raw_value: &str) {
        let mut cell = self.cells.entry(coord).or_default();
        cell.raw_value = raw_value.to_string();
    }

    pub(crate) fn set_error(&self, coord: Coord, error: bool) {
        if let Some(mut cell) = self.cells.get_mut(&coord) {
            cell.error = error;
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Present coordinates in row-major order.
    pub fn coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.cells.iter().map(|entry| *entry.key()).collect();
        coords.sort();
        coords
    }

    /// Display value of a cell: the evaluated raw text, or the error message
    /// if evaluation failed. Absent cells evaluate to an empty string.
    ///
    /// Updates the cell's `error` flag as a side effect.
    pub fn evaluated_value(&self, coord: Coord) -> String {
        Evaluator::new(self).cell_value(coord)
    }

    /// Evaluated values of every present cell inside the rectangle spanned by
    /// `start` and `end` (corners in any order), rows ascending then columns
    /// ascending. Holes are omitted.
    pub fn get_range(&self, start: Coord, end: Coord) -> Vec<(Coord, String)> {
        self.present_in_range(start, end)
            .into_iter()
            .map(|coord| (coord, self.evaluated_value(coord)))
            .collect()
    }

    pub(crate) fn present_in_range(&self, start: Coord, end: Coord) -> Vec<Coord> {
        let (min_row, max_row) = (start.row.min(end.row), start.row.max(end.row));
        let (min_col, max_col) = (start.col.min(end.col), start.col.max(end.col));

        let mut coords = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let coord = Coord::new(row, col);
                if self.contains(coord) {
                    coords.push(coord);
                }
            }
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(key: &str) -> Coord {
        Coord::parse(key).unwrap()
    }

    #[test]
    fn test_get_or_create_inserts_empty_cell() {
        let grid = Grid::new();
        let cell = grid.get_or_create_cell(at("C3"));
        assert!(cell.is_empty());
        assert!(grid.contains(at("C3")));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_get_or_create_returns_existing_cell() {
        let grid = Grid::new();
        grid.set_raw_value(at("C3"), "42");
        assert_eq!(grid.get_or_create_cell(at("C3")).raw_value, "42");
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_delete_cell() {
        let grid = Grid::new();
        grid.set_raw_value(at("A1"), "x");
        assert_eq!(grid.delete_cell(at("A1")), Some(Cell::new("x")));
        assert!(grid.is_empty());
        assert_eq!(grid.delete_cell(at("A1")), None);
    }

    #[test]
    fn test_get_range_empty_grid() {
        let grid = Grid::new();
        assert!(grid.get_range(at("A0"), at("Z99")).is_empty());
        assert!(grid.get_range(at("C5"), at("A1")).is_empty());
    }

    #[test]
    fn test_get_range_row_major_order() {
        let grid = Grid::new();
        // Inserted out of order on purpose.
        grid.set_raw_value(at("B2"), "4");
        grid.set_raw_value(at("A2"), "3");
        grid.set_raw_value(at("B1"), "2");
        grid.set_raw_value(at("A1"), "1");

        let range = grid.get_range(at("A1"), at("B2"));
        assert_eq!(
            range,
            vec![
                (at("A1"), "1".to_string()),
                (at("B1"), "2".to_string()),
                (at("A2"), "3".to_string()),
                (at("B2"), "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_range_normalizes_corners() {
        let grid = Grid::new();
        grid.set_raw_value(at("A1"), "1");
        grid.set_raw_value(at("B2"), "4");

        let expected = vec![(at("A1"), "1".to_string()), (at("B2"), "4".to_string())];
        assert_eq!(grid.get_range(at("B2"), at("A1")), expected);
        assert_eq!(grid.get_range(at("A2"), at("B1")), expected);
    }

    #[test]
    fn test_get_range_omits_holes() {
        let grid = Grid::new();
        grid.set_raw_value(at("A1"), "1");
        grid.set_raw_value(at("A3"), "3");

        let keys: Vec<String> = grid
            .get_range(at("A1"), at("A3"))
            .into_iter()
            .map(|(coord, _)| coord.key())
            .collect();
        assert_eq!(keys, vec!["A1", "A3"]);
    }

    #[test]
    fn test_get_range_evaluates_formulas() {
        let grid = Grid::new();
        grid.set_raw_value(at("A1"), "2");
        grid.set_raw_value(at("A2"), "=add(A1, 1)");

        let range = grid.get_range(at("A1"), at("A2"));
        assert_eq!(range[1].1, "3.00");
    }

    #[test]
    fn test_coords_sorted_row_major() {
        let grid = Grid::new();
        grid.set_raw_value(at("B0"), "b");
        grid.set_raw_value(at("A1"), "a");
        grid.set_raw_value(at("A0"), "a");
        assert_eq!(grid.coords(), vec![at("A0"), at("B0"), at("A1")]);
    }

    #[test]
    fn test_evaluated_value_of_absent_cell_does_not_create_it() {
        let grid = Grid::new();
        assert_eq!(grid.evaluated_value(at("D4")), "");
        assert!(grid.is_empty());
    }
}
