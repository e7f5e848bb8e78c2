use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::io;
use std::time::Instant;

use cellgrid_core::Key;

use super::app::App;
use super::ui;

/// Translate a terminal key press into a coordinator key.
///
/// Control and Alt chords have no meaning in the grid and are dropped.
pub(crate) fn translate_key(key: KeyEvent) -> Option<Key> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn is_quit_chord(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let [_formula_area, grid_area, _status_area] = ui::split_main_chunks(terminal_area);
    if let Some(coord) = ui::grid_cell_at(app, grid_area, mouse.column, mouse.row) {
        app.click(coord, Instant::now());
    }
}

pub(crate) fn handle_event(app: &mut App, terminal_area: Rect, event: Event) {
    match event {
        Event::Key(key) => {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                return;
            }
            if is_quit_chord(key) {
                app.quit();
                return;
            }
            if key.code == KeyCode::F(2) {
                app.edit_selected();
                return;
            }
            if let Some(key) = translate_key(key) {
                app.handle_key(key);
            }
        }
        Event::Mouse(mouse) => handle_mouse_event(app, terminal_area, mouse),
        Event::Paste(text) => app.paste(&text),
        Event::FocusLost => app.blur(),
        _ => {}
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let event = event::read()?;
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        handle_event(app, area, event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::{Coord, Sheet};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_translate_plain_keys() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::SHIFT);
        assert_eq!(translate_key(key), Some(Key::Char('x')));
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(translate_key(key), Some(Key::Escape));
    }

    #[test]
    fn test_control_chords_are_dropped() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(key), None);
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(translate_key(key), None);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = App::new(Sheet::new(), 10);
        handle_event(
            &mut app,
            area(),
            press(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_focus_lost_commits_edit() {
        let mut app = App::new(Sheet::new(), 10);
        handle_event(&mut app, area(), press(KeyCode::Down, KeyModifiers::NONE));
        handle_event(
            &mut app,
            area(),
            press(KeyCode::Char('4'), KeyModifiers::NONE),
        );
        assert!(app.sheet.coordinator.is_editing(Coord::new(0, 0)));

        handle_event(&mut app, area(), Event::FocusLost);
        assert!(!app.sheet.coordinator.is_editing(Coord::new(0, 0)));
        assert_eq!(app.cell_display(Coord::new(0, 0)), "4");
    }

    #[test]
    fn test_f2_and_paste_reach_the_editor() {
        let mut app = App::new(Sheet::new(), 10);
        handle_event(&mut app, area(), press(KeyCode::Down, KeyModifiers::NONE));
        handle_event(&mut app, area(), Event::Paste("=sum(1,2)".to_string()));
        assert_eq!(app.sheet.coordinator.edit_buffer(), Some("=sum(1,2)"));

        handle_event(&mut app, area(), press(KeyCode::Enter, KeyModifiers::NONE));
        handle_event(&mut app, area(), press(KeyCode::Up, KeyModifiers::NONE));
        handle_event(&mut app, area(), press(KeyCode::F(2), KeyModifiers::NONE));
        assert!(app.sheet.coordinator.is_editing(Coord::new(0, 0)));
        assert_eq!(app.sheet.coordinator.edit_buffer(), Some("=sum(1,2)"));
    }
}
