use cellgrid_engine::engine::{Coord, Grid, evaluate};

use crate::coordinator::{Coordinator, Key};
use crate::error::Result;

/// One stored cell as a front end lists it.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSummary {
    pub coord: Coord,
    pub raw_value: String,
    pub value: String,
    pub error: bool,
}

/// UI-agnostic document state for the spreadsheet.
#[derive(Debug, Default)]
pub struct Sheet {
    pub grid: Grid,
    pub coordinator: Coordinator,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    /// Store raw text at a key such as `"B7"`.
    pub fn set_cell(&self, key: &str, raw: &str) -> Result<Coord> {
        let coord = Coord::parse(key)?;
        self.grid.set_raw_value(coord, raw);
        Ok(coord)
    }

    /// Evaluate free-standing raw text against this sheet's grid.
    pub fn evaluate(&self, raw: &str) -> Result<String> {
        Ok(evaluate(raw, &self.grid)?)
    }

    /// Evaluated display value of a cell (empty for absent cells).
    pub fn display(&self, coord: Coord) -> String {
        self.grid.evaluated_value(coord)
    }

    pub fn select(&mut self, coord: Coord) {
        self.coordinator.select_cell(&self.grid, coord);
    }

    pub fn edit(&mut self, coord: Coord) {
        self.coordinator.edit_cell(&self.grid, coord);
    }

    pub fn double_click(&mut self, coord: Coord) {
        self.coordinator.double_click(&self.grid, coord);
    }

    pub fn handle_key(&mut self, key: Key) {
        self.coordinator.handle_key(&self.grid, key);
    }

    /// Replace the whole edit buffer. No-op unless a cell is being edited.
    pub fn set_buffer(&mut self, text: &str) {
        self.coordinator.set_buffer(text);
    }

    pub fn blur(&mut self) {
        self.coordinator.blur(&self.grid);
    }

    pub fn clear_selection(&mut self) {
        self.coordinator.clear_selection(&self.grid);
    }

    /// Label shown next to the formula bar.
    pub fn status_label(&self) -> String {
        match self.coordinator.selected() {
            Some(coord) => format!("Cell {}:", coord),
            None => "No Selection".to_string(),
        }
    }

    /// Text for the formula bar: the live edit buffer while editing, else the
    /// selected cell's raw value.
    pub fn formula_text(&self) -> String {
        if let Some(buffer) = self.coordinator.edit_buffer() {
            return buffer.to_string();
        }
        self.coordinator
            .selected()
            .and_then(|coord| self.grid.raw_value(coord))
            .unwrap_or_default()
    }

    /// Every cell with content, row-major, evaluated.
    pub fn non_empty_cells(&self) -> Vec<CellSummary> {
        self.grid
            .coords()
            .into_iter()
            .filter_map(|coord| {
                let raw_value = self.grid.raw_value(coord)?;
                if raw_value.is_empty() {
                    return None;
                }
                let value = self.grid.evaluated_value(coord);
                Some(CellSummary {
                    coord,
                    raw_value,
                    value,
                    error: self.grid.has_error(coord),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CellgridError;
    use cellgrid_engine::FormulaError;

    #[test]
    fn test_set_cell_rejects_malformed_key() {
        let sheet = Sheet::new();
        let err = sheet.set_cell("AA1", "x").unwrap_err();
        assert!(matches!(
            err,
            CellgridError::Formula(FormulaError::MalformedReference(_))
        ));
        assert!(sheet.grid.is_empty());
    }

    #[test]
    fn test_evaluate_against_grid() {
        let sheet = Sheet::new();
        sheet.set_cell("A1", "2").unwrap();
        sheet.set_cell("A2", "5").unwrap();
        assert_eq!(sheet.evaluate("=sum(A1:A2)").unwrap(), "7.00");
        assert!(sheet.evaluate("=nosuch()").is_err());
    }

    #[test]
    fn test_status_label() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.status_label(), "No Selection");
        sheet.select(Coord::new(7, 1));
        assert_eq!(sheet.status_label(), "Cell B7:");
    }

    #[test]
    fn test_formula_text_follows_edit_buffer() {
        let mut sheet = Sheet::new();
        let coord = sheet.set_cell("C2", "=sum(1)").unwrap();
        sheet.select(coord);
        assert_eq!(sheet.formula_text(), "=sum(1)");

        sheet.handle_key(Key::Char('9'));
        assert_eq!(sheet.formula_text(), "9");

        sheet.blur();
        assert_eq!(sheet.display(coord), "9");
    }

    #[test]
    fn test_edit_then_set_buffer_replaces_content() {
        let mut sheet = Sheet::new();
        let coord = sheet.set_cell("D4", "old").unwrap();
        sheet.set_buffer("ignored");
        assert_eq!(sheet.formula_text(), "");

        sheet.edit(coord);
        sheet.set_buffer("=sum(2,2)");
        assert_eq!(sheet.formula_text(), "=sum(2,2)");
        sheet.handle_key(Key::Enter);
        assert_eq!(sheet.display(coord), "4.00");
    }

    #[test]
    fn test_non_empty_cells_skips_selected_placeholder() {
        let mut sheet = Sheet::new();
        sheet.set_cell("B1", "=nosuch(1)").unwrap();
        sheet.set_cell("A1", "text").unwrap();
        sheet.select(Coord::new(5, 5));

        let cells = sheet.non_empty_cells();
        let keys: Vec<String> = cells.iter().map(|c| c.coord.key()).collect();
        assert_eq!(keys, vec!["A1", "B1"]);
        assert!(cells[1].error);
        assert!(cells[1].value.starts_with("Error: "));
    }

    #[test]
    fn test_clear_selection_drops_placeholder() {
        let mut sheet = Sheet::new();
        sheet.select(Coord::new(3, 3));
        assert_eq!(sheet.grid.len(), 1);
        sheet.clear_selection();
        assert!(sheet.grid.is_empty());
    }
}
