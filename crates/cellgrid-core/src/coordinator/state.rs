use cellgrid_engine::engine::Coord;

/// Keyboard input understood by the coordinator.
///
/// Front ends translate their own events into these and drop control or
/// modifier chords before calling in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Delete,
    Home,
    End,
    Char(char),
}

/// In-progress edit of one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditState {
    pub coord: Coord,
    /// Raw value when editing began; restored on Escape.
    pub original: String,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pub cursor: usize,
}

impl EditState {
    pub fn new(coord: Coord, original: String, buffer: String) -> Self {
        let cursor = buffer.len();
        EditState {
            coord,
            original,
            buffer,
            cursor,
        }
    }

    pub fn set_buffer(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if let Some(c) = self.buffer[..self.cursor].chars().next_back() {
            let start = self.cursor - c.len_utf8();
            self.buffer.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            let end = self.cursor + c.len_utf8();
            self.buffer.drain(self.cursor..end);
        }
    }
}

/// Which single cell, if any, is selected or being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(Coord),
    Editing(EditState),
}

impl SelectionState {
    pub fn coord(&self) -> Option<Coord> {
        match self {
            SelectionState::NoSelection => None,
            SelectionState::Selected(coord) => Some(*coord),
            SelectionState::Editing(edit) => Some(edit.coord),
        }
    }
}
