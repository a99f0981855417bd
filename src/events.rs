use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Acknowledge and exit
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Chart
        KeyCode::Char('a') => app.toggle_autoscale(),
        KeyCode::Char('m') => app.toggle_marker(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
