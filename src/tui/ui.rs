//! UI rendering

use super::app::App;
use cellgrid_core::Coord;
use cellgrid_engine::engine::{COLUMNS, ROWS, col_letter};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 3;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Map a terminal position to the grid cell drawn there.
pub(crate) fn grid_cell_at(
    app: &App,
    grid_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<Coord> {
    if grid_area.width < 3 || grid_area.height < 4 {
        return None;
    }

    let inner_x = grid_area.x.saturating_add(1);
    let inner_y = grid_area.y.saturating_add(1);
    let inner_right = inner_x.saturating_add(grid_area.width.saturating_sub(2));
    let inner_bottom = inner_y.saturating_add(grid_area.height.saturating_sub(2));

    // The first inner row holds column letters.
    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row <= inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    let rel_row = (mouse_row - inner_y - 1) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row + rel_row;
    if row >= ROWS {
        return None;
    }

    let first_cell_x = inner_x + ROW_HEADER_WIDTH + GRID_COLUMN_SPACING;
    if mouse_col < first_cell_x {
        return None;
    }
    let stride = app.col_width as u16 + GRID_COLUMN_SPACING;
    let rel_x = mouse_col - first_cell_x;
    // Clicks on the spacing between columns select nothing.
    if rel_x % stride >= app.col_width as u16 {
        return None;
    }
    let rel_col = (rel_x / stride) as usize;
    if rel_col >= app.visible_cols {
        return None;
    }
    let col = app.viewport_col + rel_col;
    if col >= COLUMNS {
        return None;
    }

    Some(Coord::new(row, col))
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    let grid_area = chunks[1];
    let available_width = grid_area
        .width
        .saturating_sub(ROW_HEADER_WIDTH + GRID_COLUMN_SPACING + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = (available_width / (app.col_width + 1)).clamp(1, COLUMNS);
    app.visible_rows = available_height.clamp(1, ROWS);
    app.update_viewport();

    draw_formula_bar(f, app, chunks[0]);
    draw_grid(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_formula_bar(f: &mut Frame, app: &App, area: Rect) {
    let label = app.sheet.status_label();

    let (content, title, border) = match app.sheet.coordinator.editing() {
        Some(edit) => {
            let (before, after) = edit.buffer.split_at(edit.cursor);
            (
                format!("{} {}│{}", label, before, after),
                " Edit ",
                Color::Yellow,
            )
        }
        None if app.cursor().is_some() => (
            format!("{} {}", label, app.sheet.formula_text()),
            " Cell ",
            Color::White,
        ),
        None => (label, " Cell ", Color::DarkGray),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border));

    let paragraph = Paragraph::new(content).block(block);
    f.render_widget(paragraph, area);
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let cursor = app.cursor();
    let highlight = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let cols = app.viewport_col..(app.viewport_col + app.visible_cols).min(COLUMNS);
    let rows = app.viewport_row..(app.viewport_row + app.visible_rows).min(ROWS);

    let mut header_cells = vec![Cell::from(" ")];
    for col in cols.clone() {
        let style = if cursor.is_some_and(|c| c.col == col) {
            highlight
        } else {
            dim
        };
        header_cells.push(Cell::from(col_letter(col).to_string()).style(style));
    }
    let header = Row::new(header_cells).height(1);

    let mut table_rows = Vec::new();
    for row in rows {
        let row_style = if cursor.is_some_and(|c| c.row == row) {
            highlight
        } else {
            dim
        };
        let mut cells = vec![Cell::from(row.to_string()).style(row_style)];

        for col in cols.clone() {
            let coord = Coord::new(row, col);
            let is_cursor = cursor == Some(coord);
            let is_editing = app.sheet.coordinator.is_editing(coord);

            let display = if is_editing {
                app.sheet.formula_text()
            } else {
                app.cell_display(coord)
            };

            let style = if is_editing {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if is_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if app.sheet.grid.has_error(coord) {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            cells.push(Cell::from(display).style(style));
        }

        table_rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(cols.map(|_| Constraint::Length(app.col_width as u16)));

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Cellgrid "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

/// Status bar text: a pending warning, else the selected cell's error, else
/// key hints.
pub(crate) fn status_line(app: &App) -> (String, Style) {
    if !app.status_message.is_empty() {
        return (
            app.status_message.clone(),
            Style::default().fg(Color::Yellow),
        );
    }
    if let Some(error) = app.selected_error() {
        return (error, Style::default().fg(Color::Red));
    }
    (
        format!("{} cells  |  {}", app.sheet.grid.len(), app.status_hint()),
        Style::default().fg(Color::DarkGray),
    )
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (status, style) = status_line(app);
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(status, style)]));
    f.render_widget(paragraph, area);
}
