use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;
use super::host;

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.go(host::HOME),
        KeyCode::Char('2') => app.go(host::LIBRARY),
        // Replace navigates without adding a history entry.
        KeyCode::Char('r') => app.replace(host::LIBRARY),
        KeyCode::Char('[') => app.back(),
        KeyCode::Char(']') => app.forward(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_cursor(),
        _ => {}
    }
}
