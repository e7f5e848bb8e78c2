//! Selection and editing state machine.
//!
//! One [`Coordinator`] drives one [`Grid`]. It owns the only record of which
//! cell is selected or being edited, so "at most one selected cell" holds by
//! construction. Every transition takes the grid it mutates as a parameter.
//!
//! Cells left empty are removed from the grid when the selection leaves them,
//! when an edit commits to an empty value, or on Backspace.

mod state;

pub use state::{EditState, Key, SelectionState};

use cellgrid_engine::engine::{Coord, Grid};
use log::trace;

#[derive(Debug, Default)]
pub struct Coordinator {
    state: SelectionState,
}

impl Coordinator {
    pub fn new() -> Self {
        Coordinator::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Coordinate of the selected (or edited) cell.
    pub fn selected(&self) -> Option<Coord> {
        self.state.coord()
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selected() == Some(coord)
    }

    pub fn is_editing(&self, coord: Coord) -> bool {
        matches!(&self.state, SelectionState::Editing(edit) if edit.coord == coord)
    }

    pub fn editing(&self) -> Option<&EditState> {
        match &self.state {
            SelectionState::Editing(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.editing().map(|edit| edit.buffer.as_str())
    }

    /// Select `coord`, creating an empty cell there if none exists.
    ///
    /// An edit in progress elsewhere is committed first, as if focus was lost.
    pub fn select_cell(&mut self, grid: &Grid, coord: Coord) {
        self.blur(grid);
        if let Some(previous) = self.selected()
            && previous != coord
        {
            release(grid, previous);
        }
        grid.get_or_create_cell(coord);
        trace!("select {}", coord);
        self.state = SelectionState::Selected(coord);
    }

    /// Select `coord` and start editing its current raw value.
    pub fn edit_cell(&mut self, grid: &Grid, coord: Coord) {
        self.select_cell(grid, coord);
        let raw = grid.raw_value(coord).unwrap_or_default();
        self.begin_edit(coord, raw.clone(), raw);
    }

    /// Pointer double-click: select, and edit only if the cell has content.
    pub fn double_click(&mut self, grid: &Grid, coord: Coord) {
        self.select_cell(grid, coord);
        if has_content(grid, coord) {
            let raw = grid.raw_value(coord).unwrap_or_default();
            self.begin_edit(coord, raw.clone(), raw);
        }
    }

    /// Drop the selection entirely.
    pub fn clear_selection(&mut self, grid: &Grid) {
        self.blur(grid);
        if let Some(previous) = self.selected() {
            release(grid, previous);
        }
        trace!("clear selection");
        self.state = SelectionState::NoSelection;
    }

    /// Focus left the editor: commit the buffer in place without moving.
    pub fn blur(&mut self, grid: &Grid) {
        if let SelectionState::Editing(edit) = &self.state {
            let coord = edit.coord;
            write_back(grid, coord, &edit.buffer);
            trace!("blur commit {}", coord);
            self.state = SelectionState::Selected(coord);
        }
    }

    /// Replace the whole edit buffer (formula bar input). No-op unless editing.
    pub fn set_buffer(&mut self, text: &str) {
        if let SelectionState::Editing(edit) = &mut self.state {
            edit.set_buffer(text);
        }
    }

    pub fn handle_key(&mut self, grid: &Grid, key: Key) {
        match self.state {
            SelectionState::NoSelection => {}
            SelectionState::Selected(coord) => self.handle_selected_key(grid, coord, key),
            SelectionState::Editing(_) => self.handle_editing_key(grid, key),
        }
    }

    fn handle_selected_key(&mut self, grid: &Grid, coord: Coord, key: Key) {
        match key {
            Key::Up => self.select_cell(grid, coord.offset(-1, 0)),
            Key::Down => self.select_cell(grid, coord.offset(1, 0)),
            Key::Left => self.select_cell(grid, coord.offset(0, -1)),
            Key::Right => self.select_cell(grid, coord.offset(0, 1)),
            Key::Enter => {
                let raw = grid.raw_value(coord).unwrap_or_default();
                self.begin_edit(coord, raw.clone(), raw);
            }
            Key::Escape => self.clear_selection(grid),
            Key::Backspace | Key::Delete => {
                grid.delete_cell(coord);
                trace!("cleared {}", coord);
            }
            Key::Char(c) if !c.is_control() => {
                let raw = grid.raw_value(coord).unwrap_or_default();
                self.begin_edit(coord, raw, c.to_string());
            }
            Key::Char(_) | Key::Home | Key::End => {}
        }
    }

    fn handle_editing_key(&mut self, grid: &Grid, key: Key) {
        match key {
            Key::Enter => return self.commit_and_advance(grid),
            Key::Escape => return self.cancel_edit(grid),
            _ => {}
        }

        let SelectionState::Editing(edit) = &mut self.state else {
            return;
        };
        match key {
            Key::Backspace => edit.backspace(),
            Key::Delete => edit.delete(),
            Key::Left => edit.move_left(),
            Key::Right => edit.move_right(),
            Key::Home => edit.move_home(),
            Key::End => edit.move_end(),
            Key::Char(c) if !c.is_control() => edit.insert_char(c),
            Key::Char(_) | Key::Up | Key::Down | Key::Enter | Key::Escape => {}
        }
    }

    fn begin_edit(&mut self, coord: Coord, original: String, buffer: String) {
        trace!("edit {}", coord);
        self.state = SelectionState::Editing(EditState::new(coord, original, buffer));
    }

    /// Enter while editing: commit, then step down one row. Keep editing there
    /// if the cell below already has content.
    fn commit_and_advance(&mut self, grid: &Grid) {
        let Some(coord) = self.selected() else {
            return;
        };
        self.blur(grid);

        let below = coord.offset(1, 0);
        self.select_cell(grid, below);
        if has_content(grid, below) {
            let raw = grid.raw_value(below).unwrap_or_default();
            self.begin_edit(below, raw.clone(), raw);
        }
    }

    /// Escape while editing: throw the buffer away and restore the original.
    fn cancel_edit(&mut self, grid: &Grid) {
        let SelectionState::Editing(edit) = &self.state else {
            return;
        };
        let coord = edit.coord;
        write_back(grid, coord, &edit.original);
        trace!("cancel edit {}", coord);
        self.state = SelectionState::Selected(coord);
    }
}

fn has_content(grid: &Grid, coord: Coord) -> bool {
    grid.cell(coord).is_some_and(|cell| !cell.is_empty())
}

/// Store `value`, or remove the cell when it is empty.
fn write_back(grid: &Grid, coord: Coord, value: &str) {
    if value.is_empty() {
        grid.delete_cell(coord);
    } else {
        grid.set_raw_value(coord, value);
    }
}

/// Selection is leaving `coord`; drop it if it holds nothing.
fn release(grid: &Grid, coord: Coord) {
    if grid.cell(coord).is_some_and(|cell| cell.is_empty()) {
        grid.delete_cell(coord);
    }
}
