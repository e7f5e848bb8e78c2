//! Terminal application state

use std::time::{Duration, Instant};

use cellgrid_core::{Coord, Key, Sheet};
use cellgrid_engine::engine::{COLUMNS, ROWS};

/// Two clicks on the same cell within this window count as a double click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

pub struct App {
    pub sheet: Sheet,
    pub viewport_row: usize,
    pub viewport_col: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
    pub col_width: usize,
    pub status_message: String,
    pub should_quit: bool,
    last_click: Option<(Coord, Instant)>,
}

impl App {
    pub fn new(sheet: Sheet, col_width: usize) -> Self {
        App {
            sheet,
            viewport_row: 0,
            viewport_col: 0,
            visible_rows: 20,
            visible_cols: 8,
            col_width,
            status_message: String::new(),
            should_quit: false,
            last_click: None,
        }
    }

    /// Show a warning in the status bar until the next input.
    pub fn warn(&mut self, message: &str) {
        self.status_message = format!("Warning: {}", message);
    }

    /// The selected or edited cell, if any.
    pub fn cursor(&self) -> Option<Coord> {
        self.sheet.coordinator.selected()
    }

    /// Scroll so the cursor stays visible
    pub fn update_viewport(&mut self) {
        self.viewport_row = self.viewport_row.min(ROWS.saturating_sub(self.visible_rows));
        self.viewport_col = self.viewport_col.min(COLUMNS.saturating_sub(self.visible_cols));

        let Some(cursor) = self.cursor() else {
            return;
        };

        if cursor.col < self.viewport_col {
            self.viewport_col = cursor.col;
        } else if cursor.col >= self.viewport_col + self.visible_cols {
            self.viewport_col = cursor.col + 1 - self.visible_cols;
        }

        if cursor.row < self.viewport_row {
            self.viewport_row = cursor.row;
        } else if cursor.row >= self.viewport_row + self.visible_rows {
            self.viewport_row = cursor.row + 1 - self.visible_rows;
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        self.status_message.clear();

        // Nothing is selected yet: any navigation key picks the top-left
        // visible cell instead of being dropped.
        if self.cursor().is_none() {
            if matches!(
                key,
                Key::Up | Key::Down | Key::Left | Key::Right | Key::Enter
            ) {
                self.sheet
                    .select(Coord::new(self.viewport_row, self.viewport_col));
            }
            return;
        }

        self.sheet.handle_key(key);
        self.update_viewport();
    }

    /// Left click on a grid cell at time `now`.
    pub fn click(&mut self, coord: Coord, now: Instant) {
        self.status_message.clear();
        let is_double = matches!(
            self.last_click,
            Some((prev, at)) if prev == coord && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );

        if is_double {
            self.last_click = None;
            self.sheet.double_click(coord);
        } else {
            self.last_click = Some((coord, now));
            self.sheet.select(coord);
        }
        self.update_viewport();
    }

    /// Edit the selected cell in place (F2).
    pub fn edit_selected(&mut self) {
        self.status_message.clear();
        if let Some(coord) = self.cursor() {
            self.sheet.edit(coord);
        }
    }

    /// Bracketed paste. Inserts at the edit cursor while editing; over a
    /// selected cell it replaces the content, like typing does.
    pub fn paste(&mut self, text: &str) {
        self.status_message.clear();
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return;
        }

        if self.sheet.coordinator.editing().is_some() {
            for c in text.chars() {
                self.sheet.handle_key(Key::Char(c));
            }
        } else if let Some(coord) = self.cursor() {
            self.sheet.edit(coord);
            self.sheet.set_buffer(&text);
        }
    }

    /// Error message of the selected cell, if its last evaluation failed.
    pub fn selected_error(&self) -> Option<String> {
        let coord = self.cursor()?;
        if self.sheet.coordinator.is_editing(coord) || !self.sheet.grid.has_error(coord) {
            return None;
        }
        Some(self.sheet.display(coord))
    }

    /// Terminal lost focus.
    pub fn blur(&mut self) {
        self.sheet.blur();
    }

    pub fn quit(&mut self) {
        self.sheet.blur();
        self.should_quit = true;
    }

    /// Display text for one grid cell.
    pub fn cell_display(&self, coord: Coord) -> String {
        self.sheet.display(coord)
    }

    pub fn status_hint(&self) -> &'static str {
        if self.sheet.coordinator.editing().is_some() {
            "Enter: commit  Esc: cancel  ←/→: move cursor"
        } else if self.cursor().is_some() {
            "Arrows: move  Enter/F2: edit  Type: replace  Del: clear  Ctrl-Q: quit"
        } else {
            "Click or press an arrow key to select a cell  Ctrl-Q: quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::SelectionState;

    fn app() -> App {
        let mut app = App::new(Sheet::new(), 10);
        app.visible_rows = 5;
        app.visible_cols = 3;
        app
    }

    #[test]
    fn test_navigation_without_selection_picks_top_left() {
        let mut app = app();
        app.viewport_row = 10;
        app.viewport_col = 2;
        app.handle_key(Key::Down);
        assert_eq!(app.cursor(), Some(Coord::new(10, 2)));
    }

    #[test]
    fn test_typing_without_selection_is_ignored() {
        let mut app = app();
        app.handle_key(Key::Char('x'));
        assert_eq!(app.cursor(), None);
        assert!(app.sheet.grid.is_empty());
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let mut app = app();
        app.click(Coord::new(0, 0), Instant::now());
        for _ in 0..7 {
            app.handle_key(Key::Down);
        }
        assert_eq!(app.cursor(), Some(Coord::new(7, 0)));
        assert_eq!(app.viewport_row, 3);

        for _ in 0..4 {
            app.handle_key(Key::Right);
        }
        assert_eq!(app.viewport_col, 2);

        for _ in 0..7 {
            app.handle_key(Key::Up);
        }
        assert_eq!(app.viewport_row, 0);
    }

    #[test]
    fn test_double_click_edits_non_empty_cell() {
        let mut app = app();
        let coord = app.sheet.set_cell("B2", "hello").unwrap();
        let start = Instant::now();
        app.click(coord, start);
        app.click(coord, start + Duration::from_millis(100));
        assert!(app.sheet.coordinator.is_editing(coord));
    }

    #[test]
    fn test_slow_clicks_only_select() {
        let mut app = app();
        let coord = app.sheet.set_cell("B2", "hello").unwrap();
        let start = Instant::now();
        app.click(coord, start);
        app.click(coord, start + Duration::from_secs(2));
        assert_eq!(
            app.sheet.coordinator.state(),
            &SelectionState::Selected(coord)
        );
    }

    #[test]
    fn test_quit_commits_edit() {
        let mut app = app();
        app.click(Coord::new(1, 1), Instant::now());
        app.handle_key(Key::Char('7'));
        app.quit();
        assert!(app.should_quit);
        assert_eq!(app.cell_display(Coord::new(1, 1)), "7");
    }

    #[test]
    fn test_warning_clears_on_next_key() {
        let mut app = app();
        app.warn("column_width 400 out of range, using 40");
        assert!(app.status_message.starts_with("Warning: "));
        app.handle_key(Key::Down);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_paste_over_selected_cell_replaces_it() {
        let mut app = app();
        let coord = app.sheet.set_cell("A1", "old").unwrap();
        app.click(coord, Instant::now());
        app.paste("=sum(1,\n2)");
        assert_eq!(app.sheet.formula_text(), "=sum(1,2)");

        app.handle_key(Key::Escape);
        assert_eq!(app.cell_display(coord), "old");
    }

    #[test]
    fn test_paste_while_editing_inserts_at_cursor() {
        let mut app = app();
        let coord = app.sheet.set_cell("A1", "ad").unwrap();
        app.click(coord, Instant::now());
        app.edit_selected();
        app.handle_key(Key::Left);
        app.paste("bc");
        assert_eq!(app.sheet.formula_text(), "abcd");
    }

    #[test]
    fn test_selected_error_reports_failing_cell() {
        let mut app = app();
        let coord = app.sheet.set_cell("B1", "=nosuch(1)").unwrap();
        app.click(coord, Instant::now());
        assert_eq!(app.selected_error(), None);

        app.cell_display(coord);
        assert_eq!(
            app.selected_error().as_deref(),
            Some("Error: procedure 'nosuch' not found")
        );
    }
}
