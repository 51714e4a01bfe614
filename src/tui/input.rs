//! TUI keyboard input handling.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::App;

/// Returns `true` when the UI should exit.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if app.notice.is_some() {
        return handle_notice_key(app, key);
    }

    handle_table_key(app, key)
}

fn handle_table_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        // The button only exists once a deck is loaded; the widget ignores toggles before that.
        KeyCode::Enter | KeyCode::Char(' ') => app.session.toggle_auto_draw(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.session.draw_one(),
        _ => {}
    }
    Ok(false)
}

fn handle_notice_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_notice();
    }
    Ok(false)
}
